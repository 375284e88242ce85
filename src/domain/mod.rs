//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - typed accident rows with sanitized coordinates (`IncidentRecord`)
//! - the per-year projection unit (`ProjectedRecord`, `YearProjection`)
//! - the month × year pivot (`SummaryTable`)
//! - per-state map inputs and results (`StatePointSet`, `MapFrame`, `MapOutcome`)

pub mod types;

pub use types::*;
