//! Tag Log Converter CLI Application
//!
//! Command-line front end for the tag-log-converter library. It adds the
//! thin I/O shell around the core conversion:
//! - Input/output file handling
//! - Session metadata from a config file or command-line overrides
//! - Logging setup and a user-facing summary

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tag_log_converter::{Converter, SessionInfo};

mod config;

/// Tag Log Converter - Convert XML tag logs to CSV
#[derive(Parser, Debug)]
#[command(name = "tag-log-cli")]
#[command(about = "Convert XML tag logs into a spreadsheet-ready CSV table", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the XML tag log to convert
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output CSV file (default: input path with a .csv extension)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to configuration file (config.toml) with session metadata
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Session start date as YYYY-MM-DD (overrides the config file)
    #[arg(long, value_name = "DATE")]
    session_date: Option<NaiveDate>,

    /// Session name (overrides the config file)
    #[arg(long, value_name = "NAME")]
    session_name: Option<String>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Tag Log Converter CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using converter library v{}", tag_log_converter::VERSION);

    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let extension = args
        .input
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    if extension.as_deref() != Some("xml") {
        bail!("Expected an .xml input file, got {:?}", args.input);
    }

    let session = resolve_session(args)?;
    log::debug!("Session metadata: {:?}", session);

    let converter = Converter::new(session);
    let table = converter
        .convert_file(&args.input)
        .with_context(|| format!("Failed to convert {:?}", args.input))?;

    // Encode fully in memory before touching the output path, so a failed
    // conversion never leaves a truncated artifact behind
    let csv = table.to_csv_string()?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("csv"));
    fs::write(&output, csv).with_context(|| format!("Failed to write {:?}", output))?;

    if !args.quiet {
        println!("✓ Conversion complete");
        println!("  Events: {}", table.len());
        println!("  Output: {:?}", output);
    }
    log::info!("Wrote {} row(s) to {:?}", table.len(), output);

    Ok(())
}

/// Resolve session metadata: config file values, then command-line
/// overrides, then library defaults.
fn resolve_session(args: &Args) -> Result<SessionInfo> {
    let mut session = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?.session
        }
        None => SessionInfo::default(),
    };

    if let Some(date) = args.session_date {
        session.start_date = date.format("%Y/%m/%d").to_string();
    }
    if let Some(name) = &args.session_name {
        session.name = name.clone();
    }

    Ok(session)
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
