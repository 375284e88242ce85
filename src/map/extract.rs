//! Per-state incident extraction for the map.
//!
//! One linear pass per call:
//! load → validate state → filter → (empty ? signal : bound → render).
//!
//! Coordinates arrive already sanitized from the loader, so the bounding box
//! below never sees a sentinel magnitude.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::info;

use crate::domain::{IncidentRecord, MapFrame, MapOutcome, StateCode, StatePointSet, Year};
use crate::error::{AppError, ErrorKind};
use crate::io::{fars_read, year_path};
use crate::plot::MapRenderer;

/// Distinct STATE codes present in a year's incidents. Unreadable cells are not codes.
pub fn observed_states(incidents: &[IncidentRecord]) -> BTreeSet<StateCode> {
    incidents.iter().filter_map(|i| i.state).collect()
}

/// Reject a state code the year's data never mentions.
pub fn validate_state(incidents: &[IncidentRecord], state: StateCode) -> Result<(), AppError> {
    if observed_states(incidents).contains(&state) {
        Ok(())
    } else {
        Err(AppError::new(
            ErrorKind::InvalidStateCode,
            2,
            format!("invalid STATE number: {state}"),
        ))
    }
}

pub fn filter_state(incidents: &[IncidentRecord], year: Year, state: StateCode) -> StatePointSet {
    StatePointSet {
        year,
        state,
        incidents: incidents
            .iter()
            .filter(|i| i.state == Some(state))
            .copied()
            .collect(),
    }
}

/// Renderer input for a point set, or `None` when no coordinate pair is known.
pub fn build_frame(set: &StatePointSet) -> Option<MapFrame> {
    let bounds = set.bounding_box()?;
    let points = set.positions();
    if points.is_empty() {
        return None;
    }
    Some(MapFrame {
        title: format!("FARS {}: state {}", set.year, set.state),
        bounds,
        points,
    })
}

/// Hand a filtered point set to `renderer`, or report why there is nothing to draw.
pub fn render_state(set: &StatePointSet, renderer: &mut dyn MapRenderer) -> Result<MapOutcome, AppError> {
    if set.incidents.is_empty() {
        info!(year = set.year, state = set.state, "no accidents to plot");
        return Ok(MapOutcome::NothingToPlot {
            year: set.year,
            state: set.state,
        });
    }

    let Some(frame) = build_frame(set) else {
        info!(
            year = set.year,
            state = set.state,
            incidents = set.incidents.len(),
            "no incident has usable coordinates"
        );
        return Ok(MapOutcome::NoCoordinates {
            year: set.year,
            state: set.state,
            incidents: set.incidents.len(),
        });
    };

    renderer.render(&frame)?;

    Ok(MapOutcome::Rendered {
        year: set.year,
        state: set.state,
        incidents: set.incidents.len(),
        plotted: frame.points.len(),
    })
}

/// Plot one state's incidents for `year`.
///
/// Fails if the file is missing or `state` does not occur in that year's data.
/// A state with no incidents is a normal `NothingToPlot` outcome.
pub fn fars_map_state(
    data_dir: &Path,
    state: StateCode,
    year: Year,
    renderer: &mut dyn MapRenderer,
) -> Result<MapOutcome, AppError> {
    let incidents = fars_read(year_path(data_dir, year))?.incidents()?;
    validate_state(&incidents, state)?;
    let set = filter_state(&incidents, year, state);
    render_state(&set, renderer)
}
