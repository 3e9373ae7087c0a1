//! IP range table.
//!
//! Holds the `(lower_bound, upper_bound, country)` rows, validates them when
//! the table is built and answers floor and containment lookups by binary
//! search.

mod load;
mod table;

// Re-export public API
pub use load::{coerce_bound, read_ranges, read_ranges_csv, RangeColumns};
pub use table::{IpRange, RangeTable};
