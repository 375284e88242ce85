//! Command-line parsing for the FARS summarizer.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! loading/aggregation code. Years and state numbers are coerced here with the
//! same rules the library uses, so a bad value is a usage error.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{StateCode, Year};
use crate::io::{parse_state, parse_year};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fars", version, about = "Monthly FARS accident summaries and state maps")]
pub struct Cli {
    /// Directory holding `accident_<year>.csv.bz2` files.
    ///
    /// Defaults to `FARS_DATA_DIR` (environment or `.env`), then the current directory.
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log per-file loading details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the source file name for a year.
    Filename(FilenameArgs),
    /// Load one accident file and describe its shape.
    Read(ReadArgs),
    /// Load several years and report which ones are usable.
    Years(YearsArgs),
    /// Count accidents per month for each year.
    Summarize(SummarizeArgs),
    /// Plot one state's accident locations for a year.
    Map(MapArgs),
}

#[derive(Debug, Args)]
#[command(allow_negative_numbers = true)]
pub struct FilenameArgs {
    #[arg(value_parser = parse_year)]
    pub year: Year,
}

#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Path of the file to load (`.csv.bz2` or plain `.csv`).
    pub file: PathBuf,
}

#[derive(Debug, Args)]
#[command(allow_negative_numbers = true)]
pub struct YearsArgs {
    #[arg(required = true, value_parser = parse_year)]
    pub years: Vec<Year>,
}

#[derive(Debug, Args)]
#[command(allow_negative_numbers = true)]
pub struct SummarizeArgs {
    #[arg(required = true, value_parser = parse_year)]
    pub years: Vec<Year>,

    /// Also write the table to a CSV file.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Also write the table to a JSON file.
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct MapArgs {
    /// FARS state code (e.g. 1 = Alabama, 6 = California).
    #[arg(value_parser = parse_state)]
    pub state: StateCode,

    #[arg(value_parser = parse_year)]
    pub year: Year,

    /// Write the map to an SVG file instead of drawing it in the terminal.
    #[arg(long, value_name = "PATH")]
    pub svg: Option<PathBuf>,

    /// Map width (terminal columns, or SVG pixels with `--svg`).
    #[arg(long)]
    pub width: Option<u32>,

    /// Map height (terminal rows, or SVG pixels with `--svg`).
    #[arg(long)]
    pub height: Option<u32>,
}
