//! Source file loading.
//!
//! This module turns one FARS accident file into a [`RecordTable`] and, on
//! request, into typed [`IncidentRecord`]s.
//!
//! Design goals:
//! - **Fail loudly** on a missing file: the message always names the path
//! - **No schema policing** at load time: columns are whatever the CSV holds
//! - **Sanitize at the boundary**: coordinate sentinels never leave this module
//!   as raw magnitudes

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use bzip2::read::MultiBzDecoder;
use csv::StringRecord;
use tracing::debug;

use crate::domain::{IncidentRecord, sanitize_latitude, sanitize_longitude};
use crate::error::AppError;

/// Rows of one source file, in file order.
#[derive(Debug, Clone)]
pub struct RecordTable {
    headers: Vec<String>,
    header_map: HashMap<String, usize>,
    rows: Vec<StringRecord>,
}

impl RecordTable {
    pub fn new(headers: Vec<String>, rows: Vec<StringRecord>) -> Self {
        let header_map = build_header_map(&headers);
        Self {
            headers,
            header_map,
            rows,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column index by header name (case-insensitive).
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header_map.get(&normalize_header_name(name)).copied()
    }

    /// Cell of `row` in column `name`, trimmed; `None` for empty cells.
    pub fn value(&self, row: usize, name: &str) -> Option<&str> {
        let idx = self.column(name)?;
        get_field(self.rows.get(row)?, idx)
    }

    /// The `MONTH` column as integers.
    ///
    /// Rows whose MONTH cell is empty or not an integer are skipped; only a
    /// missing `MONTH` column is an error.
    pub fn months(&self) -> Result<Vec<u32>, AppError> {
        let idx = self.require_column("MONTH")?;
        let months: Vec<u32> = self
            .rows
            .iter()
            .filter_map(|rec| parse_opt_int(rec, Some(idx)))
            .collect();

        let skipped = self.rows.len() - months.len();
        if skipped > 0 {
            debug!(skipped, "rows without a readable MONTH");
        }
        Ok(months)
    }

    /// Typed incidents with sanitized coordinates.
    ///
    /// `MONTH` and `STATE` columns are required. Cells that are empty or do
    /// not parse become `None`, as do coordinate sentinels.
    pub fn incidents(&self) -> Result<Vec<IncidentRecord>, AppError> {
        let month_idx = self.require_column("MONTH")?;
        let state_idx = self.require_column("STATE")?;
        let lat_idx = self.column("LATITUDE");
        let lon_idx = self.column("LONGITUD");

        Ok(self
            .rows
            .iter()
            .map(|rec| IncidentRecord {
                month: parse_opt_int(rec, Some(month_idx)),
                state: parse_opt_int(rec, Some(state_idx)),
                latitude: parse_coordinate(rec, lat_idx).and_then(sanitize_latitude),
                longitude: parse_coordinate(rec, lon_idx).and_then(sanitize_longitude),
            })
            .collect())
    }

    fn require_column(&self, name: &str) -> Result<usize, AppError> {
        self.column(name)
            .ok_or_else(|| AppError::parse(format!("Missing required column: `{name}`")))
    }
}

/// Load one accident file.
///
/// `.bz2` files are decompressed on the fly; anything else is read as plain
/// CSV. The file handle is dropped before returning on every path.
pub fn fars_read(path: impl AsRef<Path>) -> Result<RecordTable, AppError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AppError::missing_file(path.display()));
    }

    let file = File::open(path)
        .map_err(|e| AppError::parse(format!("Failed to open '{}': {e}", path.display())))?;
    let source: Box<dyn Read> = if is_bzip2(path) {
        Box::new(MultiBzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    let table = read_csv(source)
        .map_err(|e| AppError::parse(format!("Failed to read '{}': {e}", path.display())))?;

    debug!(
        path = %path.display(),
        rows = table.len(),
        columns = table.headers().len(),
        "loaded accident file"
    );
    Ok(table)
}

fn read_csv(source: impl Read) -> Result<RecordTable, String> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| format!("CSV header error: {e}"))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            // records() starts at line 2 (after headers)
            let line = e.position().map(|p| p.line()).unwrap_or(idx as u64 + 2);
            format!("CSV parse error at line {line}: {e}")
        })?;
        rows.push(record);
    }

    Ok(RecordTable::new(headers, rows))
}

fn is_bzip2(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("bz2"))
}

fn build_header_map(headers: &[String]) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn get_field(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_opt_int<T: std::str::FromStr>(record: &StringRecord, idx: Option<usize>) -> Option<T> {
    get_field(record, idx?)?.parse::<T>().ok()
}

fn parse_coordinate(record: &StringRecord, idx: Option<usize>) -> Option<f64> {
    get_field(record, idx?)?.parse::<f64>().ok()
}
