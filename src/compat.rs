//! Compatibility tables for the Samsung Frame 2024 TV
//!
//! Pure predicates over the codec and format names ffprobe reports.
//! The lists follow public Samsung documentation and may not be
//! exhaustive.

use std::path::Path;

/// Container tags identifying XviD/DivX-family encodes of MPEG-4
/// part 2. The codec id alone cannot tell these apart from plain
/// MPEG-4, so the tag has to be consulted.
const MPEG4_VARIANT_TAGS: &[&str] = &["XVID", "DIVX", "DX50", "MP4V", "FMP4"];

/// File extensions worth probing at all.
const SUPPORTED_EXTENSIONS: &[&str] = &["mkv", "mp4", "mov", "webm", "avi"];

/// Format name substrings of containers the TV plays. ffprobe reports
/// compound names such as "mov,mp4,m4a,3gp,3g2,mj2", so this is a
/// substring test, not an exact match.
const SUPPORTED_CONTAINERS: &[&str] = &[
    "matroska", "mp4", "mov", "mpegts", "webm", "avi", "asf", "wav", "flac",
    "mp3", "ogg", "wmv",
];

pub fn is_video_codec_supported(
    codec_name: &str,
    codec_tag: Option<&str>,
    profile: Option<&str>,
) -> bool {
    match codec_name.to_lowercase().as_str() {
        "h264" | "hevc" | "mpeg2video" | "vp9" | "av1" | "mjpeg" | "png" => true,
        "mpeg4" => {
            !has_mpeg4_variant_tag(codec_tag) && !is_mpeg4_unsupported_profile(profile)
        }
        _ => false,
    }
}

fn has_mpeg4_variant_tag(codec_tag: Option<&str>) -> bool {
    let Some(tag) = codec_tag else {
        return false;
    };
    // ffprobe prints "[0][0][0][0]" when a stream carries no tag
    if tag.is_empty() || tag.contains('[') {
        return false;
    }
    MPEG4_VARIANT_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

fn is_mpeg4_unsupported_profile(profile: Option<&str>) -> bool {
    let Some(profile) = profile else {
        return false;
    };
    let profile = profile.to_lowercase();
    profile.contains("advanced simple") || profile.contains("simple studio")
}

pub fn is_audio_codec_supported(codec_name: &str) -> bool {
    matches!(
        codec_name.to_lowercase().as_str(),
        "aac" | "ac3" | "eac3" | "mp3" | "pcm_s16le" | "flac" | "vorbis" | "opus" | "wmav2"
    )
}

pub fn is_subtitle_codec_supported(codec_name: &str) -> bool {
    matches!(
        codec_name.to_lowercase().as_str(),
        "subrip" | "ass" | "ssa" | "webvtt" | "mov_text" | "microdvd" | "text"
    )
}

/// Bitmap-rendered subtitle families. These cannot be converted to a
/// text format by re-encoding, only copied.
pub fn is_bitmap_subtitle(codec_name: &str) -> bool {
    matches!(
        codec_name.to_lowercase().as_str(),
        "hdmv_pgs_subtitle" | "dvd_subtitle"
    )
}

pub fn is_container_supported(format_name: &str) -> bool {
    SUPPORTED_CONTAINERS.iter().any(|s| format_name.contains(s))
}

pub fn has_supported_extension(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    let ext = ext.to_lowercase();
    SUPPORTED_EXTENSIONS.contains(&ext.as_str())
}
