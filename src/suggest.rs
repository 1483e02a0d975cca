//! Fix command suggestions
//!
//! Builds the ffmpeg command lines that would remux or transcode a
//! file into a compatible shape. Nothing is executed here; the
//! commands are printed for the user to paste into a shell.

use std::path::Path;

use crate::classify::{FileReport, StreamKind};

/// Fallback encoders for streams that need re-encoding.
const VIDEO_FALLBACK: &str = "libx264";
const AUDIO_FALLBACK: &str = "aac";

/// Wraps a path in single quotes so it is safe to paste into a shell.
/// Embedded single quotes become the close/escape/reopen sequence.
pub fn shell_escape_single(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 2);
    out.push('\'');
    for c in input.chars() {
        if c == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(c);
        }
    }
    out.push('\'');
    out
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn basename_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| basename(path))
}

/// Container change only, every stream copied. Fixes container-level
/// incompatibility at zero re-encode cost.
pub fn remux_command(report: &FileReport) -> String {
    let input = shell_escape_single(&report.path.to_string_lossy());
    let output = shell_escape_single(&format!("remuxed_{}.mkv", basename(&report.path)));
    format!("ffmpeg -i {} -map 0 -c copy {}", input, output)
}

/// Per-stream copy-or-reencode command. Stream types are mapped in
/// first-encounter order, codec options grouped video, audio,
/// subtitle.
pub fn transcode_command(report: &FileReport) -> String {
    let input = shell_escape_single(&report.path.to_string_lossy());
    let output = shell_escape_single(&format!("fixed_{}.mkv", basename_stem(&report.path)));

    let mut cmd = format!("ffmpeg -i {}", input);
    let mut video_opts = String::new();
    let mut audio_opts = String::new();
    let mut subtitle_opts = String::new();
    let (mut video_count, mut audio_count, mut subtitle_count) = (0u32, 0u32, 0u32);

    for stream in &report.streams {
        match stream.kind {
            StreamKind::Video => {
                if video_count == 0 {
                    cmd.push_str(" -map 0:v");
                }
                let codec = if stream.supported { "copy" } else { VIDEO_FALLBACK };
                video_opts.push_str(&format!(" -c:v:{} {}", video_count, codec));
                video_count += 1;
            }
            StreamKind::Audio => {
                if audio_count == 0 {
                    cmd.push_str(" -map 0:a");
                }
                let codec = if stream.supported { "copy" } else { AUDIO_FALLBACK };
                audio_opts.push_str(&format!(" -c:a:{} {}", audio_count, codec));
                audio_count += 1;
            }
            StreamKind::Subtitle => {
                if subtitle_count == 0 {
                    cmd.push_str(" -map 0:s");
                }
                // bitmap subtitles cannot become srt, only be copied
                let codec = if stream.supported || stream.bitmap {
                    "copy"
                } else {
                    "srt"
                };
                subtitle_opts.push_str(&format!(" -c:s:{} {}", subtitle_count, codec));
                subtitle_count += 1;
            }
        }
    }

    cmd.push_str(&video_opts);
    cmd.push_str(&audio_opts);
    cmd.push_str(&subtitle_opts);
    cmd.push(' ');
    cmd.push_str(&output);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::StreamCheck;
    use std::path::PathBuf;

    fn check(index: u32, kind: StreamKind, supported: bool, bitmap: bool) -> StreamCheck {
        StreamCheck {
            index,
            kind,
            codec_name: "x".to_string(),
            language: "und".to_string(),
            supported,
            bitmap,
        }
    }

    fn report(path: &str, streams: Vec<StreamCheck>) -> FileReport {
        FileReport {
            path: PathBuf::from(path),
            container_name: "avi".to_string(),
            container_supported: true,
            streams,
            all_supported: false,
            can_transcode: true,
            has_bitmap_subtitle: false,
        }
    }

    #[test]
    fn test_shell_escape_plain() {
        assert_eq!(shell_escape_single("movie.mkv"), "'movie.mkv'");
        assert_eq!(shell_escape_single("a b c.mkv"), "'a b c.mkv'");
    }

    #[test]
    fn test_shell_escape_single_quote() {
        assert_eq!(shell_escape_single("it's.mkv"), r"'it'\''s.mkv'");
        assert_eq!(shell_escape_single("''"), r"''\'''\'''");
    }

    #[test]
    fn test_remux_command_shape() {
        let r = report(
            "/media/old movie.avi",
            vec![check(0, StreamKind::Video, false, false)],
        );
        assert_eq!(
            remux_command(&r),
            "ffmpeg -i '/media/old movie.avi' -map 0 -c copy 'remuxed_old movie.avi.mkv'"
        );
    }

    #[test]
    fn test_transcode_maps_unsupported_video_to_fallback() {
        let r = report(
            "old.avi",
            vec![
                check(0, StreamKind::Video, false, false),
                check(1, StreamKind::Audio, true, false),
            ],
        );
        assert_eq!(
            transcode_command(&r),
            "ffmpeg -i 'old.avi' -map 0:v -map 0:a -c:v:0 libx264 -c:a:0 copy 'fixed_old.mkv'"
        );
    }

    #[test]
    fn test_transcode_bitmap_subtitle_is_copied_never_srt() {
        let r = report(
            "movie.mkv",
            vec![
                check(0, StreamKind::Video, true, false),
                check(1, StreamKind::Audio, false, false),
                check(2, StreamKind::Subtitle, false, true),
            ],
        );
        let cmd = transcode_command(&r);
        assert!(cmd.contains("-c:s:0 copy"), "bitmap subtitle must be copied: {}", cmd);
        assert!(!cmd.contains("srt"), "bitmap subtitle must never map to srt: {}", cmd);
        assert!(cmd.contains("-c:a:0 aac"));
    }

    #[test]
    fn test_transcode_unsupported_text_subtitle_becomes_srt() {
        let r = report(
            "movie.mkv",
            vec![
                check(0, StreamKind::Video, true, false),
                check(1, StreamKind::Subtitle, false, false),
                check(2, StreamKind::Subtitle, true, false),
            ],
        );
        let cmd = transcode_command(&r);
        assert!(cmd.contains("-c:s:0 srt"), "{}", cmd);
        assert!(cmd.contains("-c:s:1 copy"), "{}", cmd);
    }

    #[test]
    fn test_transcode_map_order_follows_first_encounter() {
        // audio before video in the container
        let r = report(
            "odd.mkv",
            vec![
                check(0, StreamKind::Audio, false, false),
                check(1, StreamKind::Video, true, false),
            ],
        );
        let cmd = transcode_command(&r);
        let a = cmd.find("-map 0:a").unwrap();
        let v = cmd.find("-map 0:v").unwrap();
        assert!(a < v, "map order must follow stream order: {}", cmd);
        // codec options stay grouped video first
        let copt = cmd.find("-c:v:0").unwrap();
        let aopt = cmd.find("-c:a:0").unwrap();
        assert!(copt < aopt, "{}", cmd);
    }

    #[test]
    fn test_transcode_output_name_strips_extension() {
        let r = report("clip.webm", vec![check(0, StreamKind::Video, false, false)]);
        assert!(transcode_command(&r).ends_with("'fixed_clip.mkv'"));

        let r = report("noext", vec![check(0, StreamKind::Video, false, false)]);
        assert!(transcode_command(&r).ends_with("'fixed_noext.mkv'"));
    }
}
