//! Range-join engine.
//!
//! Pairs each normalized record with the range that contains its `ip_int`,
//! using a backward-nearest search over ranges sorted by lower bound followed
//! by an upper-bound containment filter. Runs in O(N log N + M) once the
//! range table is built, never as a nested scan.

mod engine;
mod types;

// Re-export public API
pub use engine::{join, join_with, resolve};
pub use types::{JoinOptions, JoinOutcome, JoinedRecord};
