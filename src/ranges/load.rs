//! Range table loading from CSV.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::config::{DEFAULT_COUNTRY_COLUMN, DEFAULT_LOWER_BOUND_COLUMN, DEFAULT_UPPER_BOUND_COLUMN};
use crate::error_handling::RangeTableError;
use crate::normalize::IpInt;

use super::IpRange;

/// Names of the three columns the range table needs. Other columns are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeColumns {
    /// Lower bound column
    pub lower_bound: String,
    /// Upper bound column
    pub upper_bound: String,
    /// Country label column
    pub country: String,
}

impl Default for RangeColumns {
    fn default() -> Self {
        Self {
            lower_bound: DEFAULT_LOWER_BOUND_COLUMN.to_string(),
            upper_bound: DEFAULT_UPPER_BOUND_COLUMN.to_string(),
            country: DEFAULT_COUNTRY_COLUMN.to_string(),
        }
    }
}

/// Coerces a bound cell to an integer.
///
/// Accepts integer text and finite non-negative numeric text, truncated toward
/// zero (`"16777216.0"` → `16777216`). Bound columns are often float-typed.
pub fn coerce_bound(raw: &str) -> Option<IpInt> {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<IpInt>() {
        return Some(n);
    }
    let f = trimmed.parse::<f64>().ok()?.trunc();
    if !f.is_finite() || f < 0.0 || f >= IpInt::MAX as f64 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(f as IpInt)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, RangeTableError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| RangeTableError::MissingColumn(name.to_string()))
}

/// Reads range rows from CSV data with a header row.
///
/// Rows are returned in file order; sorting and validation belong to
/// [`RangeTable::new`](super::RangeTable::new).
///
/// # Errors
///
/// Fails on the first missing column, malformed CSV row or non-coercible
/// bound. No partial table is returned.
pub fn read_ranges<R: Read>(
    reader: R,
    columns: &RangeColumns,
) -> Result<Vec<IpRange>, RangeTableError> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let lower_idx = column_index(&headers, &columns.lower_bound)?;
    let upper_idx = column_index(&headers, &columns.upper_bound)?;
    let country_idx = column_index(&headers, &columns.country)?;

    let mut ranges = Vec::new();
    for (i, row) in csv_reader.records().enumerate() {
        let row = row?;
        let row_number = i + 1;
        let bound = |idx: usize, column: &str| {
            let raw = row.get(idx).unwrap_or_default();
            coerce_bound(raw).ok_or_else(|| RangeTableError::NonCoercibleBound {
                row: row_number,
                column: column.to_string(),
                value: raw.to_string(),
            })
        };
        let lower_bound = bound(lower_idx, &columns.lower_bound)?;
        let upper_bound = bound(upper_idx, &columns.upper_bound)?;
        let country = row.get(country_idx).unwrap_or_default().to_string();
        ranges.push(IpRange {
            lower_bound,
            upper_bound,
            country,
        });
    }

    log::debug!("Read {} ranges", ranges.len());
    Ok(ranges)
}

/// Reads range rows from a CSV file.
pub fn read_ranges_csv(
    path: &Path,
    columns: &RangeColumns,
) -> Result<Vec<IpRange>, RangeTableError> {
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    read_ranges(file, columns)
}
