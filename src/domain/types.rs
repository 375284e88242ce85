//! Shared domain types.
//!
//! Everything here is transient: built per call from the source files and
//! dropped afterwards. The types are kept plain (and serializable where they
//! are exported) so the pipeline stages stay easy to test in isolation.

use serde::Serialize;

/// A calendar year as used in FARS file names.
pub type Year = i32;

/// FARS state/territory code (non-contiguous, e.g. 3 and 7 are unused).
pub type StateCode = i32;

/// Raw latitudes above this value are "unknown" sentinels (e.g. 77.7777, 99.9999).
pub const LATITUDE_SENTINEL_ABOVE: f64 = 90.0;

/// Raw longitudes above this value are "unknown" sentinels (e.g. 999.9999).
pub const LONGITUDE_SENTINEL_ABOVE: f64 = 900.0;

/// Convert a raw latitude to degrees, or `None` when it is a sentinel.
pub fn sanitize_latitude(raw: f64) -> Option<f64> {
    (raw.is_finite() && raw <= LATITUDE_SENTINEL_ABOVE).then_some(raw)
}

/// Convert a raw longitude to degrees, or `None` when it is a sentinel.
pub fn sanitize_longitude(raw: f64) -> Option<f64> {
    (raw.is_finite() && raw <= LONGITUDE_SENTINEL_ABOVE).then_some(raw)
}

/// Typed view of one accident row.
///
/// Every field is optional. Empty or non-numeric cells arrive as `None`, and
/// so do coordinate sentinel magnitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncidentRecord {
    pub month: Option<u32>,
    pub state: Option<StateCode>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl IncidentRecord {
    /// `(longitude, latitude)` when both coordinates are known.
    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.longitude?, self.latitude?))
    }
}

/// The unit counted by the summary: one incident reduced to its month and the
/// year of the file it was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProjectedRecord {
    pub month: u32,
    pub year: Year,
}

/// All projected records of a single year's file.
#[derive(Debug, Clone, PartialEq)]
pub struct YearProjection {
    pub year: Year,
    pub records: Vec<ProjectedRecord>,
}

impl YearProjection {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Month × year incident counts.
///
/// `years` holds the column keys (ascending); each row carries one cell per
/// column. A `None` cell means no incident of that year fell in that month:
/// absent combinations are never reported as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryTable {
    pub years: Vec<Year>,
    pub rows: Vec<SummaryRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub month: u32,
    pub counts: Vec<Option<u64>>,
}

impl SummaryTable {
    pub fn months(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.iter().map(|r| r.month)
    }

    /// Cell lookup; `None` both for absent cells and unknown keys.
    pub fn count(&self, month: u32, year: Year) -> Option<u64> {
        let col = self.years.iter().position(|&y| y == year)?;
        let row = self.rows.iter().find(|r| r.month == month)?;
        row.counts.get(col).copied().flatten()
    }

    /// Sum of a year's column, or `None` if the year is not a column.
    pub fn total_for_year(&self, year: Year) -> Option<u64> {
        let col = self.years.iter().position(|&y| y == year)?;
        Some(self.rows.iter().filter_map(|r| r.counts[col]).sum())
    }
}

/// Geographic extent of a set of incidents, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl BoundingBox {
    /// Grow each axis by `frac` of its span; degenerate axes get a fixed
    /// half-degree margin so a single incident still yields a drawable view.
    pub fn padded(&self, frac: f64) -> BoundingBox {
        let pad = |min: f64, max: f64| {
            let span = max - min;
            if span <= f64::EPSILON {
                (min - 0.5, max + 0.5)
            } else {
                (min - span * frac, max + span * frac)
            }
        };
        let (lon_min, lon_max) = pad(self.lon_min, self.lon_max);
        let (lat_min, lat_max) = pad(self.lat_min, self.lat_max);
        BoundingBox {
            lon_min,
            lon_max,
            lat_min,
            lat_max,
        }
    }
}

/// Incidents of one state in one year.
#[derive(Debug, Clone, PartialEq)]
pub struct StatePointSet {
    pub year: Year,
    pub state: StateCode,
    pub incidents: Vec<IncidentRecord>,
}

impl StatePointSet {
    /// `(longitude, latitude)` pairs of incidents with both coordinates known.
    pub fn positions(&self) -> Vec<(f64, f64)> {
        self.incidents.iter().filter_map(IncidentRecord::position).collect()
    }

    /// Extent of the known coordinates, each axis computed independently.
    ///
    /// Returns `None` when either axis has no known value.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let (lon_min, lon_max) = axis_range(self.incidents.iter().filter_map(|i| i.longitude))?;
        let (lat_min, lat_max) = axis_range(self.incidents.iter().filter_map(|i| i.latitude))?;
        Some(BoundingBox {
            lon_min,
            lon_max,
            lat_min,
            lat_max,
        })
    }
}

fn axis_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Everything a renderer needs to draw one state map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapFrame {
    pub title: String,
    pub bounds: BoundingBox,
    /// `(longitude, latitude)` pairs.
    pub points: Vec<(f64, f64)>,
}

/// Result of a map request that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum MapOutcome {
    /// The renderer was called with `plotted` points out of `incidents`.
    Rendered {
        year: Year,
        state: StateCode,
        incidents: usize,
        plotted: usize,
    },
    /// The state has no incidents in the year.
    NothingToPlot { year: Year, state: StateCode },
    /// Incidents exist but none has a usable coordinate pair.
    NoCoordinates {
        year: Year,
        state: StateCode,
        incidents: usize,
    },
}
