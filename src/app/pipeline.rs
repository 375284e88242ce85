//! Shared multi-year read/aggregate pipeline used by the CLI front-end.
//!
//! year → file name → load → project MONTH → tag with year, once per year,
//! then union → group → count → pivot for the summary.
//!
//! Per-year loads are independent, so they run on the rayon pool. Each one
//! yields its own `Result`; a failed year becomes a warning and a positional
//! gap, and only the aggregation step decides whether that is fatal.

use std::path::Path;

use rayon::prelude::*;
use tracing::warn;

use crate::domain::{ProjectedRecord, SummaryTable, Year, YearProjection};
use crate::error::{AppError, ErrorKind};
use crate::io::{fars_read, year_path};

/// Result of loading one requested year.
#[derive(Debug, Clone)]
pub struct YearOutcome {
    pub year: Year,
    pub result: Result<YearProjection, AppError>,
}

/// Per-year outcomes of a batch request, in request order.
#[derive(Debug, Clone)]
pub struct YearBatch {
    outcomes: Vec<YearOutcome>,
}

impl YearBatch {
    pub fn outcomes(&self) -> &[YearOutcome] {
        &self.outcomes
    }

    /// Positional view: `None` where the year failed.
    pub fn tables(&self) -> Vec<Option<&YearProjection>> {
        self.outcomes.iter().map(|o| o.result.as_ref().ok()).collect()
    }

    pub fn into_tables(self) -> Vec<Option<YearProjection>> {
        self.outcomes.into_iter().map(|o| o.result.ok()).collect()
    }

    pub fn failed_years(&self) -> Vec<Year> {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_err())
            .map(|o| o.year)
            .collect()
    }
}

/// Reduce one year's MONTH column to projected records tagged with `year`.
pub fn tag_months(months: &[u32], year: Year) -> Vec<ProjectedRecord> {
    months
        .iter()
        .map(|&month| ProjectedRecord { month, year })
        .collect()
}

/// Load and project a single year. Errors propagate unchanged.
pub fn project_year(data_dir: &Path, year: Year) -> Result<YearProjection, AppError> {
    let table = fars_read(year_path(data_dir, year))?;
    let months = table.months()?;
    Ok(YearProjection {
        year,
        records: tag_months(&months, year),
    })
}

/// Load every year in isolation. Never fails; each failure is logged once.
pub fn read_years(data_dir: &Path, years: &[Year]) -> YearBatch {
    let outcomes: Vec<YearOutcome> = years
        .par_iter()
        .map(|&year| YearOutcome {
            year,
            result: project_year(data_dir, year),
        })
        .collect();

    for outcome in &outcomes {
        if let Err(e) = &outcome.result {
            warn!(year = outcome.year, "invalid year: {} ({e})", outcome.year);
        }
    }

    YearBatch { outcomes }
}

/// One `(projection | None)` entry per requested year.
pub fn fars_read_years(data_dir: &Path, years: &[Year]) -> Vec<Option<YearProjection>> {
    read_years(data_dir, years).into_tables()
}

/// Month × year incident counts over every year that loads.
///
/// Fails only when no requested year could be loaded.
pub fn fars_summarize_years(data_dir: &Path, years: &[Year]) -> Result<SummaryTable, AppError> {
    let projections: Vec<YearProjection> = fars_read_years(data_dir, years)
        .into_iter()
        .flatten()
        .collect();

    if projections.is_empty() {
        return Err(AppError::new(
            ErrorKind::InvalidYearBatch,
            3,
            format!("no valid years among {years:?}"),
        ));
    }

    Ok(crate::report::summarize(&projections))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{capture_logs, rows, write_year};
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        let mut y2013 = rows(1, 1, 3);
        y2013.extend(rows(6, 2, 1));
        let mut y2014 = rows(1, 1, 5);
        y2014.extend(rows(1, 12, 2));
        write_year(dir.path(), 2013, &y2013);
        write_year(dir.path(), 2014, &y2014);
        dir
    }

    #[test]
    fn projection_tags_requested_year_not_file_content() {
        let dir = fixture();
        let p = project_year(dir.path(), 2013).unwrap();
        assert_eq!(p.len(), 4);
        assert!(p.records.iter().all(|r| r.year == 2013));
        assert_eq!(
            p.records.iter().map(|r| r.month).collect::<Vec<_>>(),
            vec![1, 1, 1, 2]
        );
    }

    #[test]
    fn missing_year_leaves_positional_gap() {
        let dir = fixture();
        let batch = read_years(dir.path(), &[2013, 9999]);

        assert_eq!(batch.failed_years(), vec![9999]);
        let tables = batch.tables();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].map(|p| p.year), Some(2013));
        assert!(tables[1].is_none());

        let err = batch.outcomes()[1].result.as_ref().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingFile);
        assert!(err.to_string().contains("accident_9999.csv.bz2"));
    }

    #[test]
    fn each_failed_year_warns_once() {
        let dir = fixture();
        let (batch, lines) = capture_logs(|| read_years(dir.path(), &[2013, 9999]));

        assert_eq!(batch.failed_years(), vec![9999]);
        let warnings: Vec<&String> = lines.iter().filter(|l| l.contains("WARN")).collect();
        assert_eq!(warnings.len(), 1, "{lines:?}");
        assert!(warnings[0].contains("invalid year: 9999"));
    }

    #[test]
    fn read_years_preserves_request_order() {
        let dir = fixture();
        let tables = fars_read_years(dir.path(), &[2014, 9998, 2013, 9999]);
        let years: Vec<Option<Year>> = tables.iter().map(|t| t.as_ref().map(|p| p.year)).collect();
        assert_eq!(years, vec![Some(2014), None, Some(2013), None]);
    }

    #[test]
    fn summarize_counts_month_by_year() {
        let dir = fixture();
        let table = fars_summarize_years(dir.path(), &[2014, 2013]).unwrap();

        assert_eq!(table.years, vec![2013, 2014]);
        assert_eq!(table.months().collect::<Vec<_>>(), vec![1, 2, 12]);
        assert_eq!(table.count(1, 2013), Some(3));
        assert_eq!(table.count(1, 2014), Some(5));
        assert_eq!(table.count(2, 2014), None);
        assert_eq!(table.count(12, 2013), None);
        assert_eq!(table.count(12, 2014), Some(2));
    }

    #[test]
    fn summarize_tolerates_partial_failure() {
        let dir = fixture();
        let table = fars_summarize_years(dir.path(), &[2013, 9999]).unwrap();
        assert_eq!(table.years, vec![2013]);
    }

    #[test]
    fn unreadable_month_cells_do_not_sink_the_year() {
        let dir = TempDir::new().unwrap();
        crate::testutil::write_bz2(
            dir.path(),
            "accident_2015.csv.bz2",
            "STATE,MONTH\n1,3\n1,\n1,3\n",
        );
        let table = fars_summarize_years(dir.path(), &[2015]).unwrap();
        assert_eq!(table.count(3, 2015), Some(2));
        assert_eq!(table.months().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn summarize_fails_when_no_year_loads() {
        let dir = fixture();
        let err = fars_summarize_years(dir.path(), &[9999]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidYearBatch);
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("no valid years"));
    }

    #[test]
    fn summarize_is_repeatable() {
        let dir = fixture();
        let a = fars_summarize_years(dir.path(), &[2013, 2014]).unwrap();
        let b = fars_summarize_years(dir.path(), &[2013, 2014]).unwrap();
        assert_eq!(a, b);
    }
}
