//! Directory traversal and the per-file check pipeline
//!
//! Depth-first walk with glob exclusion, extension filtering, and the
//! probe -> classify -> report -> summary flow. Single-threaded and
//! sequential; the summary is the only mutable state and is threaded
//! through by reference.

use glob_match::glob_match;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

use crate::classify::FileReport;
use crate::compat;
use crate::ffprobe;
use crate::report::{self, Summary};

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Glob patterns matched against the full constructed path; any
    /// match prunes the file or directory from the walk.
    pub excludes: Vec<String>,
    pub fullpath: bool,
    pub brief: bool,
    pub skip_ok: bool,
    pub skip_unfixable: bool,
}

fn is_excluded(path: &Path, excludes: &[String]) -> bool {
    let path = path.to_string_lossy();
    excludes.iter().any(|pattern| glob_match(pattern, &path))
}

/// Collects regular files under `dir`, pruning excluded paths. A
/// pruned directory is never descended into, so none of its children
/// show up. Unreadable entries are logged and skipped.
pub fn collect_files(dir: &Path, excludes: &[String]) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_excluded(e.path(), excludes))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .collect()
}

pub fn scan_dir(dir: &Path, opts: &ScanOptions, summary: &mut Summary) {
    for path in collect_files(dir, &opts.excludes) {
        check_file(&path, opts, summary);
    }
}

/// Probes and reports one file. Files without a media extension are
/// skipped silently and never counted.
pub fn check_file(path: &Path, opts: &ScanOptions, summary: &mut Summary) {
    if !compat::has_supported_extension(path) {
        return;
    }

    let probe = match ffprobe::probe_file(path) {
        Ok(probe) => probe,
        Err(err) => {
            report::print_probe_error(path, &err, opts.fullpath, opts.brief);
            summary.record_error();
            return;
        }
    };

    process_report(&FileReport::from_probe(path, &probe), opts, summary);
}

fn process_report(file_report: &FileReport, opts: &ScanOptions, summary: &mut Summary) {
    if opts.brief {
        if file_report.all_supported {
            summary.record_ok();
        } else {
            report::print_brief(file_report, opts.fullpath);
            summary.record_not_supported();
        }
        return;
    }

    // early exits only suppress output, the counters stay identical
    if opts.skip_ok && file_report.all_supported {
        summary.record_ok();
        return;
    }
    if opts.skip_unfixable
        && !file_report.all_supported
        && !file_report.can_transcode
        && file_report.has_bitmap_subtitle
    {
        summary.record_not_supported();
        return;
    }

    report::print_verbose(file_report, opts.fullpath);
    if file_report.all_supported {
        summary.record_ok();
    } else {
        summary.record_not_supported();
    }
}
