//! Stream classification
//!
//! Turns probed stream records into per-stream verdicts and the
//! file-level support flags that drive reporting and command
//! suggestions.

use std::path::{Path, PathBuf};

use crate::compat;
use crate::ffprobe::{ProbeOutput, ProbeStream};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Video,
    Audio,
    Subtitle,
}

impl StreamKind {
    /// Data and attachment streams return None and are excluded from
    /// classification entirely.
    pub fn from_codec_type(codec_type: &str) -> Option<Self> {
        match codec_type {
            "video" => Some(StreamKind::Video),
            "audio" => Some(StreamKind::Audio),
            "subtitle" => Some(StreamKind::Subtitle),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StreamKind::Video => "video",
            StreamKind::Audio => "audio",
            StreamKind::Subtitle => "subtitle",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StreamCheck {
    pub index: u32,
    pub kind: StreamKind,
    pub codec_name: String,
    pub language: String,
    pub supported: bool,
    /// Subtitle streams only: bitmap-rendered, so re-encoding to a
    /// text format cannot fix it.
    pub bitmap: bool,
}

pub fn classify_stream(stream: &ProbeStream) -> Option<StreamCheck> {
    let kind = StreamKind::from_codec_type(stream.codec_type.as_deref()?)?;
    let codec_name = stream
        .codec_name
        .clone()
        .unwrap_or_else(|| "unknown".to_string());

    let supported = match kind {
        StreamKind::Video => compat::is_video_codec_supported(
            &codec_name,
            stream.codec_tag_string.as_deref(),
            stream.profile.as_deref(),
        ),
        StreamKind::Audio => compat::is_audio_codec_supported(&codec_name),
        StreamKind::Subtitle => compat::is_subtitle_codec_supported(&codec_name),
    };
    let bitmap = kind == StreamKind::Subtitle && compat::is_bitmap_subtitle(&codec_name);

    Some(StreamCheck {
        index: stream.index,
        kind,
        codec_name,
        language: stream.language().to_string(),
        supported,
        bitmap,
    })
}

/// One file's verdict. Computed once per file and discarded after its
/// report is printed.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub container_name: String,
    pub container_supported: bool,
    pub streams: Vec<StreamCheck>,
    pub all_supported: bool,
    /// At least one unsupported stream is fixable by re-encoding.
    pub can_transcode: bool,
    pub has_bitmap_subtitle: bool,
}

impl FileReport {
    pub fn from_probe(path: &Path, probe: &ProbeOutput) -> Self {
        let container_name = probe
            .format
            .format_name
            .clone()
            .unwrap_or_else(|| "unknown".to_string());
        let container_supported = compat::is_container_supported(&container_name);

        let streams: Vec<StreamCheck> = probe.streams.iter().filter_map(classify_stream).collect();

        let mut all_supported = container_supported;
        let mut can_transcode = false;
        let mut has_bitmap_subtitle = false;
        for stream in &streams {
            if stream.supported {
                continue;
            }
            all_supported = false;
            match stream.kind {
                StreamKind::Video | StreamKind::Audio => can_transcode = true,
                StreamKind::Subtitle => {
                    if stream.bitmap {
                        has_bitmap_subtitle = true;
                    } else {
                        can_transcode = true;
                    }
                }
            }
        }

        FileReport {
            path: path.to_path_buf(),
            container_name,
            container_supported,
            streams,
            all_supported,
            can_transcode,
            has_bitmap_subtitle,
        }
    }

    pub fn has_video(&self) -> bool {
        self.streams.iter().any(|s| s.kind == StreamKind::Video)
    }

    pub fn has_audio(&self) -> bool {
        self.streams.iter().any(|s| s.kind == StreamKind::Audio)
    }

    /// A remux only helps when there is a video or audio stream to
    /// carry over into the new container.
    pub fn wants_remux(&self) -> bool {
        !self.all_supported && (self.has_video() || self.has_audio())
    }

    pub fn wants_transcode(&self) -> bool {
        self.wants_remux() && self.can_transcode
    }
}
