//! Application-level helpers: run statistics and exit code policy.

mod exit_code;
pub(crate) mod statistics;

pub use exit_code::{
    evaluate_exit_code, EXIT_ERROR, EXIT_NO_RECORDS, EXIT_OK, EXIT_POLICY_VIOLATED,
};
pub use statistics::{print_join_statistics, print_simple_summary};
