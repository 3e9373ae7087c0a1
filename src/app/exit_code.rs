//! Exit code policy.

use crate::config::FailOn;
use crate::JoinReport;

/// Run completed and the policy is satisfied.
pub const EXIT_OK: i32 = 0;
/// The run itself failed.
pub const EXIT_ERROR: i32 = 1;
/// The run completed but left more records unmatched than the policy allows.
pub const EXIT_POLICY_VIOLATED: i32 = 2;
/// A percentage policy was requested on a run with no records.
pub const EXIT_NO_RECORDS: i32 = 3;

/// Maps a completed run to a process exit code under the `--fail-on` policy.
pub fn evaluate_exit_code(fail_on: FailOn, pct_threshold: u8, report: &JoinReport) -> i32 {
    match fail_on {
        FailOn::Never => EXIT_OK,
        FailOn::AnyUnmatched => {
            if report.unmatched > 0 {
                EXIT_POLICY_VIOLATED
            } else {
                EXIT_OK
            }
        }
        FailOn::PctGreaterThan => {
            if report.total_records == 0 {
                return EXIT_NO_RECORDS;
            }
            #[allow(clippy::cast_precision_loss)]
            let unmatched_pct = (report.unmatched as f64 / report.total_records as f64) * 100.0;
            if unmatched_pct > f64::from(pct_threshold) {
                EXIT_POLICY_VIOLATED
            } else {
                EXIT_OK
            }
        }
    }
}
