//! `fars` library crate.
//!
//! Reads yearly FARS accident files (`accident_<year>.csv.bz2`), counts
//! accidents per month across years, and maps one state's accidents for a
//! year. The binary (`fars`) is a thin wrapper around this library so the
//! pipeline is testable without spawning processes.

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod map;
pub mod plot;
pub mod report;

#[cfg(test)]
mod testutil;

pub use app::pipeline::{fars_read_years, fars_summarize_years};
pub use io::{fars_read, make_filename};
pub use map::fars_map_state;
