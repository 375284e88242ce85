//! Formatted terminal output.
//!
//! We keep formatting code in one place so output changes stay localized and
//! the golden tests below cover every user-visible table.

use chrono::Month;

use crate::app::pipeline::YearBatch;
use crate::domain::{MapOutcome, SummaryTable};
use crate::io::make_filename;

const LABEL_WIDTH: usize = 6;

/// Month × year table with a trailing per-year total; absent cells print `NA`.
pub fn format_summary_table(table: &SummaryTable) -> String {
    if table.rows.is_empty() {
        return "no incidents\n".to_string();
    }

    let widths: Vec<usize> = table
        .years
        .iter()
        .enumerate()
        .map(|(col, year)| {
            table
                .rows
                .iter()
                .map(|r| cell_text(r.counts[col]).len())
                .chain(std::iter::once(year.to_string().len()))
                .max()
                .unwrap_or(2)
        })
        .collect();

    let mut out = format!("{:<w$}", "MONTH", w = LABEL_WIDTH);
    for (year, w) in table.years.iter().zip(widths.iter().copied()) {
        out.push_str(&format!("  {year:>w$}"));
    }
    out.push('\n');

    for row in &table.rows {
        out.push_str(&format!("{:<w$}", month_label(row.month), w = LABEL_WIDTH));
        for (cell, w) in row.counts.iter().zip(widths.iter().copied()) {
            out.push_str(&format!("  {:>w$}", cell_text(*cell)));
        }
        out.push('\n');
    }

    out.push_str(&format!("{:<w$}", "total", w = LABEL_WIDTH));
    for (year, w) in table.years.iter().zip(widths.iter().copied()) {
        let total = table.total_for_year(*year).unwrap_or(0);
        out.push_str(&format!("  {total:>w$}"));
    }
    out.push('\n');
    out
}

/// One line per requested year: row count, or `NULL` with the failure reason.
pub fn format_year_batch(batch: &YearBatch) -> String {
    let mut out = String::new();
    for outcome in batch.outcomes() {
        match &outcome.result {
            Ok(projection) => out.push_str(&format!(
                "{}  {}  {} rows\n",
                outcome.year,
                make_filename(outcome.year),
                projection.len()
            )),
            Err(e) => out.push_str(&format!("{}  NULL  ({e})\n", outcome.year)),
        }
    }
    out
}

pub fn format_map_outcome(outcome: &MapOutcome) -> String {
    match outcome {
        MapOutcome::Rendered {
            year,
            state,
            incidents,
            plotted,
        } => format!("state {state}, {year}: plotted {plotted} of {incidents} incidents"),
        MapOutcome::NothingToPlot { year, state } => {
            format!("state {state}, {year}: no accidents to plot")
        }
        MapOutcome::NoCoordinates {
            year,
            state,
            incidents,
        } => format!("state {state}, {year}: none of {incidents} incidents has usable coordinates"),
    }
}

fn cell_text(cell: Option<u64>) -> String {
    cell.map(|c| c.to_string()).unwrap_or_else(|| "NA".to_string())
}

fn month_label(month: u32) -> String {
    let abbr = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name()[..3].to_string())
        .unwrap_or_else(|| "?".to_string());
    format!("{month:>2} {abbr}")
}
