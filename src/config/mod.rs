//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (default column names, logging interval)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{
    Config, FailOn, JoinMode, LogFormat, LogLevel, OutputFormat, RangeValidation,
    UnparseablePolicy,
};
