//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - initialises logging
//! - resolves the data directory
//! - dispatches to the read/summarize/map pipelines and prints results

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cli::{Cli, Command, MapArgs, ReadArgs, SummarizeArgs, YearsArgs};
use crate::error::AppError;
use crate::io::{fars_read, make_filename, write_summary_csv, write_summary_json};
use crate::plot::{AsciiMapRenderer, MapRenderer, SvgMapRenderer};

pub mod pipeline;

/// Environment variable naming the default data directory.
pub const DATA_DIR_ENV: &str = "FARS_DATA_DIR";

const TERMINAL_MAP_SIZE: (u32, u32) = (80, 30);
const SVG_MAP_SIZE: (u32, u32) = (1024, 768);

/// Entry point for the `fars` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    // `.env` may carry `RUST_LOG`, so it is loaded before the subscriber.
    dotenvy::dotenv().ok();
    init_logging(cli.verbose);

    let data_dir = resolve_data_dir(cli.data_dir.as_deref(), std::env::var_os(DATA_DIR_ENV));

    match cli.command {
        Command::Filename(args) => {
            println!("{}", make_filename(args.year));
            Ok(())
        }
        Command::Read(args) => handle_read(args),
        Command::Years(args) => handle_years(&data_dir, args),
        Command::Summarize(args) => handle_summarize(&data_dir, args),
        Command::Map(args) => handle_map(&data_dir, args),
    }
}

/// Install the global subscriber. `RUST_LOG` wins; otherwise warnings only,
/// or debug output with `--verbose`.
fn init_logging(verbose: bool) {
    let filter = log_filter(verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok());

    let layer = fmt::layer()
        .with_target(false)
        .with_writer(io::stderr);

    // A subscriber may already be set (e.g. when embedded); keep the existing one.
    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}

fn log_filter(verbose: bool, directives: Option<String>) -> EnvFilter {
    let default = if verbose { "debug" } else { "warn" };
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

/// `--data-dir` first, then `FARS_DATA_DIR`, then the current directory.
pub fn resolve_data_dir(explicit: Option<&Path>, env_value: Option<OsString>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn handle_read(args: ReadArgs) -> Result<(), AppError> {
    let table = fars_read(&args.file)?;
    println!(
        "{}: {} rows, {} columns",
        args.file.display(),
        table.len(),
        table.headers().len()
    );
    println!("{}", table.headers().join(","));
    if !table.is_empty() {
        let first: Vec<&str> = table
            .headers()
            .iter()
            .map(|h| table.value(0, h).unwrap_or(""))
            .collect();
        println!("{}", first.join(","));
    }
    Ok(())
}

fn handle_years(data_dir: &Path, args: YearsArgs) -> Result<(), AppError> {
    let batch = pipeline::read_years(data_dir, &args.years);
    print!("{}", crate::report::format_year_batch(&batch));
    Ok(())
}

fn handle_summarize(data_dir: &Path, args: SummarizeArgs) -> Result<(), AppError> {
    let table = pipeline::fars_summarize_years(data_dir, &args.years)?;
    print!("{}", crate::report::format_summary_table(&table));

    if let Some(path) = &args.csv {
        write_summary_csv(path, &table)?;
    }
    if let Some(path) = &args.json {
        write_summary_json(path, &table)?;
    }
    Ok(())
}

fn handle_map(data_dir: &Path, args: MapArgs) -> Result<(), AppError> {
    let outcome = match &args.svg {
        Some(path) => {
            let mut renderer = SvgMapRenderer::new(
                path,
                args.width.unwrap_or(SVG_MAP_SIZE.0),
                args.height.unwrap_or(SVG_MAP_SIZE.1),
            );
            draw_map(data_dir, &args, &mut renderer)?
        }
        None => {
            let mut renderer = AsciiMapRenderer::new(
                io::stdout().lock(),
                args.width.unwrap_or(TERMINAL_MAP_SIZE.0) as usize,
                args.height.unwrap_or(TERMINAL_MAP_SIZE.1) as usize,
            );
            draw_map(data_dir, &args, &mut renderer)?
        }
    };

    println!("{}", crate::report::format_map_outcome(&outcome));
    Ok(())
}

fn draw_map(
    data_dir: &Path,
    args: &MapArgs,
    renderer: &mut dyn MapRenderer,
) -> Result<crate::domain::MapOutcome, AppError> {
    crate::map::fars_map_state(data_dir, args.state, args.year, renderer)
}
