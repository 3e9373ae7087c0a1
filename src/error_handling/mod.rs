//! Error handling and join statistics.
//!
//! This module provides:
//! - Error type definitions for contract violations
//! - Miss categorization and per-run join statistics
//!
//! Normalization failures never show up here as errors: they are recovered
//! locally and only counted.

mod stats;
mod types;

// Re-export public API
pub use stats::JoinStats;
pub use types::{DatasetError, InitializationError, MissReason, RangeTableError};
