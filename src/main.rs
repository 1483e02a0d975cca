use clap::Parser;
use std::path::PathBuf;
use std::process;

use vid_compat::report::Summary;
use vid_compat::scan::{self, ScanOptions};
use vid_compat::{ffprobe, logging};

#[derive(Parser)]
#[command(name = "vid-compat")]
#[command(version, about = "Checks video files against the Samsung Frame TV support tables and suggests ffmpeg fixes", long_about = None)]
struct Cli {
    /// File or directory to check
    #[arg(value_name = "PATH")]
    input: PathBuf,

    /// Glob pattern to prune from the scan (repeatable)
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Print the given path instead of the file name
    #[arg(long)]
    fullpath: bool,

    /// One line per file, summary suppressed
    #[arg(long)]
    brief: bool,

    /// Omit fully supported files from the output (still counted)
    #[arg(long)]
    skip_ok: bool,

    /// Omit files whose only problem is a bitmap subtitle (still counted)
    #[arg(long)]
    skip_unfixable: bool,
}

fn main() -> anyhow::Result<()> {
    logging::init("vid_compat=warn")?;

    // usage errors exit 1, not clap's default 2
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    process::exit(0)
                }
                _ => process::exit(1),
            }
        }
    };

    if !ffprobe::is_ffprobe_available() {
        eprintln!("❌ Error: ffprobe not found in PATH. Install FFmpeg to use this tool.");
        process::exit(1);
    }

    let opts = ScanOptions {
        excludes: cli.exclude,
        fullpath: cli.fullpath,
        brief: cli.brief,
        skip_ok: cli.skip_ok,
        skip_unfixable: cli.skip_unfixable,
    };
    let mut summary = Summary::default();

    if cli.input.is_dir() {
        scan::scan_dir(&cli.input, &opts, &mut summary);
    } else if cli.input.is_file() {
        scan::check_file(&cli.input, &opts, &mut summary);
    } else if !cli.input.exists() {
        eprintln!("❌ Error: Input path does not exist: {}", cli.input.display());
        process::exit(1);
    } else {
        eprintln!(
            "❌ Error: Not a regular file or directory: {}",
            cli.input.display()
        );
        process::exit(1);
    }

    if !opts.brief {
        summary.print();
    }

    Ok(())
}
