//! vid-compat - TV compatibility checking for video files
//!
//! Probes media files with ffprobe and classifies containers and
//! stream codecs against the Samsung Frame 2024 TV support tables,
//! then suggests ffmpeg remux/transcode commands for files that need
//! fixing. Probing is delegated entirely to ffprobe; this crate
//! contributes the classification tables, report formatting, command
//! suggestion, and directory traversal.

pub mod classify;
pub mod compat;
pub mod ffprobe;
pub mod logging;
pub mod report;
pub mod scan;
pub mod suggest;

pub use classify::{classify_stream, FileReport, StreamCheck, StreamKind};
pub use ffprobe::{is_ffprobe_available, probe_file, ProbeError, ProbeOutput, ProbeStream};
pub use report::Summary;
pub use scan::{check_file, scan_dir, ScanOptions};
pub use suggest::{remux_command, shell_escape_single, transcode_command};
