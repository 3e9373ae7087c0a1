//! Configuration constants.
//!
//! This module defines the default column names of the input datasets and other
//! operational parameters used throughout the application.

// Records dataset
/// Column holding the IP representation in the records dataset
pub const DEFAULT_IP_COLUMN: &str = "ip_address";

// Range dataset
/// Column holding the inclusive lower bound of a range
pub const DEFAULT_LOWER_BOUND_COLUMN: &str = "lower_bound_ip_address";
/// Column holding the inclusive upper bound of a range
pub const DEFAULT_UPPER_BOUND_COLUMN: &str = "upper_bound_ip_address";
/// Column holding the country label of a range
pub const DEFAULT_COUNTRY_COLUMN: &str = "country";

// Output columns appended after the passthrough record columns
/// Normalized integer form of the record's IP
pub const OUTPUT_IP_INT_COLUMN: &str = "ip_address_int";
/// Lower bound of the matched range
pub const OUTPUT_LOWER_BOUND_COLUMN: &str = DEFAULT_LOWER_BOUND_COLUMN;
/// Upper bound of the matched range
pub const OUTPUT_UPPER_BOUND_COLUMN: &str = DEFAULT_UPPER_BOUND_COLUMN;
/// Country label of the matched range
pub const OUTPUT_COUNTRY_COLUMN: &str = DEFAULT_COUNTRY_COLUMN;

/// Cell contents read as a missing value, matching the default NA tokens of
/// dataframe CSV readers. The empty cell is handled separately.
pub const NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Path value that selects standard input (records) or standard output (export)
pub const STDIO_PATH: &str = "-";

/// Emit a progress line every this many records while reading input
pub const LOGGING_INTERVAL: usize = 100_000;
