//! FFprobe wrapper module
//!
//! Runs ffprobe as a subprocess and deserializes its JSON output into
//! typed records. Demuxing and codec parameter parsing stay inside
//! FFmpeg; this module only consumes the stream metadata it reports.

use serde::Deserialize;
use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("ffprobe not found in PATH (install FFmpeg)")]
    ToolNotFound,

    #[error("{message}")]
    ExecutionFailed {
        message: String,
        exit_code: Option<i32>,
    },

    #[error("failed to parse ffprobe output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ProbeError {
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ProbeError::ExecutionFailed { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProbeOutput {
    #[serde(default)]
    pub format: ProbeFormat,
    #[serde(default)]
    pub streams: Vec<ProbeStream>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProbeFormat {
    #[serde(default)]
    pub format_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProbeStream {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub codec_type: Option<String>,
    #[serde(default)]
    pub codec_name: Option<String>,
    #[serde(default)]
    pub codec_tag_string: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub tags: StreamTags,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StreamTags {
    #[serde(default)]
    pub language: Option<String>,
}

impl ProbeStream {
    pub fn language(&self) -> &str {
        self.tags.language.as_deref().unwrap_or("und")
    }
}

pub fn is_ffprobe_available() -> bool {
    which::which("ffprobe").is_ok()
}

/// Probes a single file. One blocking subprocess call per file, no
/// retry: any failure is final for that file.
pub fn probe_file(path: &Path) -> Result<ProbeOutput, ProbeError> {
    debug!(path = %path.display(), "probing file");
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
            "--",
        ])
        .arg(path)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ProbeError::ToolNotFound
            } else {
                ProbeError::Io(e)
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = if stderr.trim().is_empty() {
            format!("ffprobe failed to analyze {}", path.display())
        } else {
            stderr.trim().to_string()
        };
        return Err(ProbeError::ExecutionFailed {
            message,
            exit_code: output.status.code(),
        });
    }

    let parsed: ProbeOutput = serde_json::from_slice(&output.stdout)?;
    if parsed.streams.is_empty() {
        return Err(ProbeError::ExecutionFailed {
            message: format!("no stream info in {}", path.display()),
            exit_code: None,
        });
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MKV_SAMPLE: &str = r#"{
        "streams": [
            {
                "index": 0,
                "codec_name": "h264",
                "codec_type": "video",
                "codec_tag_string": "[0][0][0][0]",
                "profile": "High",
                "tags": { "language": "eng" }
            },
            {
                "index": 1,
                "codec_name": "ac3",
                "codec_type": "audio",
                "tags": { "language": "jpn" }
            },
            {
                "index": 2,
                "codec_name": "subrip",
                "codec_type": "subtitle"
            },
            {
                "index": 3,
                "codec_type": "attachment"
            }
        ],
        "format": { "format_name": "matroska,webm" }
    }"#;

    #[test]
    fn test_parse_full_probe() {
        let parsed: ProbeOutput = serde_json::from_str(MKV_SAMPLE).unwrap();
        assert_eq!(parsed.format.format_name.as_deref(), Some("matroska,webm"));
        assert_eq!(parsed.streams.len(), 4);
        assert_eq!(parsed.streams[0].codec_name.as_deref(), Some("h264"));
        assert_eq!(parsed.streams[0].profile.as_deref(), Some("High"));
        assert_eq!(parsed.streams[1].language(), "jpn");
    }

    #[test]
    fn test_language_defaults_to_und() {
        let parsed: ProbeOutput = serde_json::from_str(MKV_SAMPLE).unwrap();
        assert_eq!(parsed.streams[2].language(), "und");
        assert_eq!(parsed.streams[3].language(), "und");
    }

    #[test]
    fn test_parse_missing_format() {
        let json = r#"{"streams":[{"index":0,"codec_type":"video","codec_name":"vp9"}]}"#;
        let parsed: ProbeOutput = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.format.format_name, None);
        assert_eq!(parsed.streams[0].codec_tag_string, None);
        assert_eq!(parsed.streams[0].profile, None);
    }

    #[test]
    fn test_parse_empty_object() {
        let parsed: ProbeOutput = serde_json::from_str("{}").unwrap();
        assert!(parsed.streams.is_empty());
        assert_eq!(parsed.format.format_name, None);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(serde_json::from_str::<ProbeOutput>("not json").is_err());
    }

    #[test]
    fn test_probe_error_exit_code() {
        let err = ProbeError::ExecutionFailed {
            message: "bad file".to_string(),
            exit_code: Some(1),
        };
        assert_eq!(err.exit_code(), Some(1));
        assert_eq!(format!("{}", err), "bad file");

        assert_eq!(ProbeError::ToolNotFound.exit_code(), None);
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_arbitrary_input_never_panics(s in ".*") {
            let _ = serde_json::from_str::<ProbeOutput>(&s);
        }

        #[test]
        fn prop_language_roundtrip(lang in "[a-z]{2,3}") {
            let json = format!(
                r#"{{"streams":[{{"index":0,"codec_type":"audio","codec_name":"aac","tags":{{"language":"{}"}}}}]}}"#,
                lang
            );
            let parsed: ProbeOutput = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(parsed.streams[0].language(), lang.as_str());
        }
    }
}
