//! Union → group → count → pivot.
//!
//! Each step is a plain function over owned/borrowed data so the pivot can be
//! tested without touching the filesystem.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{ProjectedRecord, SummaryRow, SummaryTable, Year, YearProjection};

/// Row-wise bind of per-year projections, in input order.
pub fn union_projections(projections: &[YearProjection]) -> Vec<ProjectedRecord> {
    projections
        .iter()
        .flat_map(|p| p.records.iter().copied())
        .collect()
}

/// Incident counts keyed by `(year, month)`.
pub fn count_by_year_month(records: &[ProjectedRecord]) -> BTreeMap<(Year, u32), u64> {
    let mut counts = BTreeMap::new();
    for r in records {
        *counts.entry((r.year, r.month)).or_insert(0) += 1;
    }
    counts
}

/// Spread years into columns.
///
/// Rows are the months that occur in `counts` and columns the years that
/// occur in `counts`, both ascending. Cells without a count stay `None`.
pub fn pivot_years(counts: &BTreeMap<(Year, u32), u64>) -> SummaryTable {
    let years: Vec<Year> = counts
        .keys()
        .map(|&(y, _)| y)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let months: BTreeSet<u32> = counts.keys().map(|&(_, m)| m).collect();

    let rows = months
        .into_iter()
        .map(|month| SummaryRow {
            month,
            counts: years
                .iter()
                .map(|&year| counts.get(&(year, month)).copied())
                .collect(),
        })
        .collect();

    SummaryTable { years, rows }
}

/// Full aggregation of already-loaded projections.
pub fn summarize(projections: &[YearProjection]) -> SummaryTable {
    let union = union_projections(projections);
    pivot_years(&count_by_year_month(&union))
}
