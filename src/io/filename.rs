//! Year → source file naming, and integer coercion of user-supplied keys.

use std::path::{Path, PathBuf};

use crate::domain::{StateCode, Year};
use crate::error::AppError;

/// FARS file name for `year`, e.g. `accident_2013.csv.bz2`.
pub fn make_filename(year: Year) -> String {
    format!("accident_{year}.csv.bz2")
}

/// Full path of `year`'s file inside `data_dir`.
pub fn year_path(data_dir: &Path, year: Year) -> PathBuf {
    data_dir.join(make_filename(year))
}

/// Read a year from text.
///
/// Accepts integer text, or a finite decimal which is truncated toward zero
/// (`"2013.0"` and `"2013.9"` are both 2013).
pub fn parse_year(raw: &str) -> Result<Year, AppError> {
    coerce_integer(raw).ok_or_else(|| AppError::coercion("year", raw))
}

/// Read a state code from text, with the same rules as [`parse_year`].
pub fn parse_state(raw: &str) -> Result<StateCode, AppError> {
    coerce_integer(raw).ok_or_else(|| AppError::coercion("state number", raw))
}

fn coerce_integer(raw: &str) -> Option<i32> {
    let s = raw.trim();
    if let Ok(v) = s.parse::<i32>() {
        return Some(v);
    }
    let v = s.parse::<f64>().ok()?;
    if !v.is_finite() {
        return None;
    }
    let t = v.trunc();
    if t < i32::MIN as f64 || t > i32::MAX as f64 {
        return None;
    }
    Some(t as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn filename_renders_plain_integer() {
        assert_eq!(make_filename(2013), "accident_2013.csv.bz2");
        assert_eq!(make_filename(7), "accident_7.csv.bz2");
        assert_eq!(make_filename(-1), "accident_-1.csv.bz2");
    }

    #[test]
    fn year_path_joins_data_dir() {
        let p = year_path(Path::new("/data/fars"), 2015);
        assert_eq!(p, PathBuf::from("/data/fars/accident_2015.csv.bz2"));
    }

    #[test]
    fn parse_year_accepts_integers_and_integral_decimals() {
        assert_eq!(parse_year("2014").unwrap(), 2014);
        assert_eq!(parse_year(" 2014 ").unwrap(), 2014);
        assert_eq!(parse_year("2013.0").unwrap(), 2013);
        assert_eq!(parse_year("2013.9").unwrap(), 2013);
    }

    #[test]
    fn parse_year_rejects_garbage() {
        for raw in ["", "abc", "20x3", "NaN", "inf", "1e12"] {
            let err = parse_year(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Coercion, "input {raw:?}");
            assert!(err.to_string().contains("year"));
        }
    }

    #[test]
    fn parse_state_reports_state_in_message() {
        let err = parse_state("alabama").unwrap_err();
        assert!(err.to_string().contains("state number"));
        assert!(err.to_string().contains("alabama"));
        assert_eq!(parse_state("1").unwrap(), 1);
    }
}
