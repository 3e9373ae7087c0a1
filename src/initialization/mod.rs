//! Application initialization.
//!
//! Sets up process-wide resources before a run. The join itself needs none;
//! only logging is global.

mod logger;

// Re-export public API
pub use logger::init_logger_with;
