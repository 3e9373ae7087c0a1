//! Error type definitions.
//!
//! This module defines the error types raised by the library and the miss
//! categories tracked during a join.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::normalize::IpInt;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Contract violations in the range table.
///
/// Any of these aborts the whole join; there is no partial output.
#[derive(Error, Debug)]
pub enum RangeTableError {
    /// A bound could not be coerced to an unsigned integer.
    #[error("row {row}: {column} value {value:?} is not an unsigned integer")]
    NonCoercibleBound {
        /// 1-based data row (header excluded)
        row: usize,
        /// Column the value came from
        column: String,
        /// Raw cell content
        value: String,
    },

    /// `lower_bound > upper_bound`.
    #[error("range {lower_bound}..={upper_bound} ({country}) has its bounds inverted")]
    InvertedBounds {
        /// Offending lower bound
        lower_bound: IpInt,
        /// Offending upper bound
        upper_bound: IpInt,
        /// Country of the offending range
        country: String,
    },

    /// Two ranges share at least one address.
    #[error(
        "range {first_lower}..={first_upper} ({first_country}) overlaps \
         {second_lower}..={second_upper} ({second_country})"
    )]
    Overlap {
        /// Lower bound of the earlier range
        first_lower: IpInt,
        /// Upper bound of the earlier range
        first_upper: IpInt,
        /// Country of the earlier range
        first_country: String,
        /// Lower bound of the later range
        second_lower: IpInt,
        /// Upper bound of the later range
        second_upper: IpInt,
        /// Country of the later range
        second_country: String,
    },

    /// A required column is absent from the header row.
    #[error("range table has no {0:?} column")]
    MissingColumn(String),

    /// The CSV itself is malformed or unreadable.
    #[error("range table CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors reading the records dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The configured IP column is absent from the header row.
    #[error("records have no {0:?} column")]
    MissingColumn(String),

    /// The CSV itself is malformed or unreadable.
    #[error("records CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Reasons a record ends up without a country.
///
/// None of these is an error; they are tracked so a run can report where its
/// misses came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum MissReason {
    /// The range table is empty
    EmptyRangeTable,
    /// `ip_int` is smaller than every lower bound
    BelowAllRanges,
    /// `ip_int` lies past the upper bound of its backward-nearest range
    InGap,
    /// The IP failed to normalize and the policy excludes such records
    UnparseableIp,
}

impl std::fmt::Display for MissReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MissReason {
    /// Human-readable label used in the statistics log.
    pub fn as_str(&self) -> &'static str {
        match self {
            MissReason::EmptyRangeTable => "Empty range table",
            MissReason::BelowAllRanges => "Below all ranges",
            MissReason::InGap => "Between ranges",
            MissReason::UnparseableIp => "Unparseable IP",
        }
    }
}
