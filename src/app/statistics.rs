//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{JoinStats, MissReason};

/// Prints matched/unmatched counts and the miss breakdown to the log.
pub fn print_join_statistics(stats: &JoinStats) {
    info!(
        "Join statistics: records={}, matched={}, unmatched={} ({:.2}%)",
        stats.records(),
        stats.matched(),
        stats.total_misses(),
        stats.unmatched_pct()
    );

    if stats.total_misses() > 0 {
        info!("Miss Counts ({} total):", stats.total_misses());
        for reason in MissReason::iter() {
            let count = stats.miss_count(reason);
            if count > 0 {
                info!("   {}: {}", reason.as_str(), count);
            }
        }
    }

    if stats.unparseable() > 0 {
        info!(
            "{} record(s) had an IP that failed to normalize",
            stats.unparseable()
        );
    }
}

/// Prints a one-line summary of the run.
pub fn print_simple_summary(records: usize, written: usize, elapsed_seconds: f64) {
    info!(
        "Joined {} record{} ({} written) in {:.1}s",
        records,
        if records == 1 { "" } else { "s" },
        written,
        elapsed_seconds
    );
}
