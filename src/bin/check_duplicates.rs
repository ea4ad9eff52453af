//! check-duplicates - find similarly named media files in a folder.
//!
//! Usage:
//!   check-duplicates audio FOLDER            Compare audio files in FOLDER
//!   check-duplicates video FOLDER -r         Include subfolders
//!   check-duplicates image FOLDER -e -s 0.9  Skip same-extension pairs, stricter match

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use serde_json::json;

use dropfolder::logging::{self, LogTarget};
use dropfolder_analyze::{SimilarNameFinder, SimilarityConfig};
use dropfolder_scan::{MediaScanConfig, MediaScanner};

#[derive(Parser)]
#[command(
    name = "check-duplicates",
    version,
    about = "Detect somewhat similar filenames among files of one type (audio, video, image etc.)",
    long_about = "check-duplicates sniffs the content of every file in FOLDER, keeps those \
                  whose detected MIME type contains MIME_TYPE, and lists each pair whose \
                  names, extensions stripped, are at least --similarity alike."
)]
struct Cli {
    /// MIME type substring to match ('audio', 'audio/mpeg', 'video' etc.)
    #[arg(value_name = "MIME_TYPE")]
    mime_type: String,

    /// Folder to search for duplicates
    #[arg(value_name = "FOLDER")]
    folder: PathBuf,

    /// Descend into subfolders
    #[arg(short, long)]
    recurse: bool,

    /// Do not compare files that share the same extension
    #[arg(short = 'e', long = "no_similar_extensions")]
    no_similar_extensions: bool,

    /// Minimum similarity ratio between 0 and 1
    #[arg(short, long, default_value_t = 0.8)]
    similarity: f64,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Log skipped files and timings
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init(cli.verbose, LogTarget::Stderr);

    let status = run(&cli, &mut io::stdout().lock())?;
    std::process::exit(status);
}

/// Scan, compare and report. Returns the process exit status.
fn run(cli: &Cli, out: &mut impl Write) -> Result<i32> {
    let scan_config = MediaScanConfig::builder()
        .root(&cli.folder)
        .mime_substring(cli.mime_type.as_str())
        .recurse(cli.recurse)
        .build()
        .context("Invalid arguments")?;
    let similarity = SimilarityConfig::builder()
        .threshold(cli.similarity)
        .ignore_same_extension(cli.no_similar_extensions)
        .build()
        .context("Invalid similarity")?;

    let scan = match MediaScanner::new().scan(&scan_config) {
        Ok(scan) => scan,
        Err(e) if e.is_invalid_input() => {
            writeln!(out, "{e}")?;
            return Ok(1);
        }
        Err(e) => return Err(e).context("Scan failed"),
    };

    let report = SimilarNameFinder::with_config(similarity).find(&scan.records);

    match cli.format {
        OutputFormat::Text => {
            writeln!(
                out,
                "Found {} files of type {} in {}",
                scan.len(),
                cli.mime_type,
                cli.folder.display()
            )?;
            for pair in &report.pairs {
                writeln!(
                    out,
                    "{}  |  {}  ->  {:.1}%",
                    pair.first.display(),
                    pair.second.display(),
                    pair.percentage()
                )?;
            }
        }
        OutputFormat::Json => {
            let document = json!({
                "mime_type": cli.mime_type,
                "folder": cli.folder,
                "files_found": scan.len(),
                "unreadable": scan.unreadable,
                "scan_seconds": scan.scan_duration.as_secs_f64(),
                "report": report,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
        }
    }

    Ok(0)
}
