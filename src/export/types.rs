//! Export types and options.

use std::path::PathBuf;

use crate::config::{
    OutputFormat, OUTPUT_COUNTRY_COLUMN, OUTPUT_IP_INT_COLUMN, OUTPUT_LOWER_BOUND_COLUMN,
    OUTPUT_UPPER_BOUND_COLUMN,
};

/// Options for exporting joined records.
#[derive(Clone, Debug)]
pub struct ExportOptions {
    /// Output file path (or stdout if None)
    pub output: Option<PathBuf>,
    /// Export format
    pub format: OutputFormat,
}

/// Columns appended after the original record columns, in output order.
pub(crate) fn join_columns() -> [&'static str; 4] {
    [
        OUTPUT_IP_INT_COLUMN,
        OUTPUT_LOWER_BOUND_COLUMN,
        OUTPUT_UPPER_BOUND_COLUMN,
        OUTPUT_COUNTRY_COLUMN,
    ]
}
