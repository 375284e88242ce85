//! Export the month × year summary to CSV or JSON.
//!
//! The CSV mirrors the terminal table (one column per year) and is meant to be
//! easy to consume in spreadsheets; absent cells are left empty, not zero.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::SummaryTable;
use crate::error::AppError;

/// Write the summary as `MONTH,<year>,<year>,...`.
pub fn write_summary_csv(path: &Path, table: &SummaryTable) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::output(format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;
    let mut w = BufWriter::new(file);

    let header: Vec<String> = std::iter::once("MONTH".to_string())
        .chain(table.years.iter().map(|y| y.to_string()))
        .collect();
    writeln!(w, "{}", header.join(","))
        .map_err(|e| AppError::output(format!("Failed to write export CSV header: {e}")))?;

    for row in &table.rows {
        let cells: Vec<String> = std::iter::once(row.month.to_string())
            .chain(row.counts.iter().map(|c| c.map(|n| n.to_string()).unwrap_or_default()))
            .collect();
        writeln!(w, "{}", cells.join(","))
            .map_err(|e| AppError::output(format!("Failed to write export CSV row: {e}")))?;
    }

    w.flush()
        .map_err(|e| AppError::output(format!("Failed to flush export CSV: {e}")))
}

/// Write the summary as pretty-printed JSON (`years` + `rows`, `null` for absent cells).
pub fn write_summary_json(path: &Path, table: &SummaryTable) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::output(format!("Failed to create export JSON '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), table)
        .map_err(|e| AppError::output(format!("Failed to write export JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SummaryRow;
    use tempfile::TempDir;

    fn table() -> SummaryTable {
        SummaryTable {
            years: vec![2013, 2014],
            rows: vec![
                SummaryRow {
                    month: 1,
                    counts: vec![Some(3), Some(5)],
                },
                SummaryRow {
                    month: 2,
                    counts: vec![None, Some(2)],
                },
            ],
        }
    }

    #[test]
    fn csv_leaves_absent_cells_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.csv");
        write_summary_csv(&path, &table()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "MONTH,2013,2014\n1,3,5\n2,,2\n");
    }

    #[test]
    fn json_uses_null_for_absent_cells() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.json");
        write_summary_json(&path, &table()).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["years"], serde_json::json!([2013, 2014]));
        assert_eq!(value["rows"][1]["month"], 2);
        assert!(value["rows"][1]["counts"][0].is_null());
        assert_eq!(value["rows"][1]["counts"][1], 2);
    }

    #[test]
    fn unwritable_path_is_an_output_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("summary.csv");
        let err = write_summary_csv(&path, &table()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Output);
        assert_eq!(err.exit_code(), 4);
    }
}
