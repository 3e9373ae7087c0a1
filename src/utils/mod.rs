//! Utility modules.

mod timing;

pub use timing::{Phase, TimingStats};
