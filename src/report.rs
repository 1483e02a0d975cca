//! Report rendering
//!
//! Verbose tree output, brief one-line output, and the run summary.
//! Colors go through `console`, which drops the escape codes when
//! stdout is not a terminal.

use console::style;
use std::path::Path;

use crate::classify::FileReport;
use crate::ffprobe::ProbeError;
use crate::suggest;

/// Run-wide counters. Every probed file lands in exactly one of ok,
/// not_supported, or errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub ok: usize,
    pub not_supported: usize,
    pub errors: usize,
}

impl Summary {
    pub fn record_ok(&mut self) {
        self.total += 1;
        self.ok += 1;
    }

    pub fn record_not_supported(&mut self) {
        self.total += 1;
        self.not_supported += 1;
    }

    pub fn record_error(&mut self) {
        self.total += 1;
        self.errors += 1;
    }

    pub fn print(&self) {
        println!();
        println!("--- Summary ---");
        println!("Total checked: {}", self.total);
        println!("{}", style(format!("OK: {}", self.ok)).green());
        println!(
            "{}",
            style(format!("NOT SUPPORTED: {}", self.not_supported)).red()
        );
        println!("{}", style(format!("Errors: {}", self.errors)).yellow());
    }
}

pub fn display_name(path: &Path, fullpath: bool) -> String {
    if fullpath {
        return path.display().to_string();
    }
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn print_verbose(report: &FileReport, fullpath: bool) {
    println!("----------------");
    println!();
    println!("{}", display_name(&report.path, fullpath));

    let container_verdict = if report.container_supported {
        style("OK").green()
    } else {
        style("NOT SUPPORTED").red()
    };
    println!(
        "  container: {} | {}",
        report.container_name, container_verdict
    );

    for stream in &report.streams {
        let verdict = if stream.supported {
            style("OK").green()
        } else {
            style("NOT SUPPORTED").red()
        };
        println!(
            "    [{}] {} | {} | {} | {}",
            stream.index,
            stream.kind.as_str(),
            stream.codec_name,
            stream.language,
            verdict
        );
        if !stream.supported && stream.bitmap {
            println!(
                "{}",
                style(format!(
                    "  Note: Subtitle stream {} ({}) is bitmap-based and cannot be converted to srt. It will be copied as-is (may not be supported on your TV).",
                    stream.index, stream.codec_name
                ))
                .yellow()
            );
        }
    }

    let overall = if report.all_supported {
        style("ALL TRACKS SUPPORTED").green()
    } else {
        style("SOME TRACKS UNSUPPORTED").red()
    };
    println!("  overall: {}", overall);

    if report.wants_remux() {
        println!();
        println!("  Suggested remuxing command:");
        println!("    {}", suggest::remux_command(report));
        println!(
            "{}",
            style("    (This changes only the container; streams are copied without re-encoding)")
                .yellow()
        );
    }
    if report.wants_transcode() {
        println!();
        println!("  Suggested ffmpeg command:");
        println!("    {}", suggest::transcode_command(report));
    }
    println!();
}

/// One tag per element so the line is a complete fingerprint of the
/// file. Only called for files with something unsupported.
pub fn brief_line(report: &FileReport) -> String {
    let mut line = String::new();
    if !report.container_supported {
        line.push_str(
            &style(format!("[container:{}]", report.container_name))
                .red()
                .to_string(),
        );
    }
    for stream in &report.streams {
        let tag = format!(
            "[{}:{}:{}:{}]",
            stream.index,
            stream.kind.as_str(),
            stream.codec_name,
            stream.language
        );
        let styled = if stream.supported {
            style(tag).green()
        } else {
            style(tag).red()
        };
        line.push_str(&styled.to_string());
    }
    line
}

pub fn print_brief(report: &FileReport, fullpath: bool) {
    println!(
        "{}:{}",
        display_name(&report.path, fullpath),
        brief_line(report)
    );
}

pub fn print_probe_error(path: &Path, err: &ProbeError, fullpath: bool, brief: bool) {
    let name = display_name(path, fullpath);
    if brief {
        let code = err
            .exit_code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "?".to_string());
        println!(
            "{}: {}",
            name,
            style(format!("error: could not probe ({})", code)).yellow()
        );
    } else {
        println!("{}: {}", name, style(format!("error: {}", err)).yellow());
    }
}
