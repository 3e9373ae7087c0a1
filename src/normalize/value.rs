//! Raw IP representations and CSV column typing.

use crate::config::NA_VALUES;

/// An IP as it arrives in a record, before normalization.
///
/// Mirrors the shapes a tabular cell can take: text, an integer, a float (IP
/// columns are often stored as float-typed columns), or nothing at all.
#[derive(Debug, Clone, PartialEq)]
pub enum IpValue {
    /// Dotted-decimal IPv4 or IPv6 text
    Text(String),
    /// Already-numeric integer value
    Integer(i128),
    /// Already-numeric float value
    Float(f64),
    /// Empty cell
    Missing,
}

impl From<&str> for IpValue {
    fn from(s: &str) -> Self {
        IpValue::Text(s.to_string())
    }
}

impl From<String> for IpValue {
    fn from(s: String) -> Self {
        IpValue::Text(s)
    }
}

impl From<i128> for IpValue {
    fn from(n: i128) -> Self {
        IpValue::Integer(n)
    }
}

impl From<u32> for IpValue {
    fn from(n: u32) -> Self {
        IpValue::Integer(i128::from(n))
    }
}

impl From<u64> for IpValue {
    fn from(n: u64) -> Self {
        IpValue::Integer(i128::from(n))
    }
}

impl From<f64> for IpValue {
    fn from(n: f64) -> Self {
        IpValue::Float(n)
    }
}

impl<T: Into<IpValue>> From<Option<T>> for IpValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(IpValue::Missing, Into::into)
    }
}

/// Whether a trimmed cell stands for a missing value.
fn is_na(cell: &str) -> bool {
    cell.is_empty() || NA_VALUES.contains(&cell)
}

/// Parses a cell known to belong to a numeric column.
fn numeric_cell(cell: &str) -> Option<IpValue> {
    if let Ok(n) = cell.parse::<i128>() {
        return Some(IpValue::Integer(n));
    }
    cell.parse::<f64>().ok().map(IpValue::Float)
}

/// Types a whole IP column the way a dataframe reader would.
///
/// If every non-empty cell parses as a number the column is numeric and its
/// cells become [`IpValue::Integer`] or [`IpValue::Float`]. Otherwise the
/// column is textual and every non-empty cell becomes [`IpValue::Text`], even
/// the numeric-looking ones. Empty cells and NA tokens (`NA`, `null`, `N/A`,
/// ...) are [`IpValue::Missing`] either way and do not affect the typing.
pub fn infer_column<S: AsRef<str>>(cells: &[S]) -> Vec<IpValue> {
    let numeric = cells
        .iter()
        .map(|c| c.as_ref().trim())
        .filter(|c| !is_na(c))
        .all(|c| numeric_cell(c).is_some());

    cells
        .iter()
        .map(|cell| {
            let cell = cell.as_ref();
            let trimmed = cell.trim();
            if is_na(trimmed) {
                IpValue::Missing
            } else if numeric {
                numeric_cell(trimmed).unwrap_or(IpValue::Missing)
            } else {
                IpValue::Text(cell.to_string())
            }
        })
        .collect()
}
