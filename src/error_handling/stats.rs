//! Join statistics tracking.
//!
//! Counts matched records and misses per reason for a single join call.

use std::collections::HashMap;
use strum::IntoEnumIterator;

use super::types::MissReason;

/// Per-run join statistics.
///
/// Every [`MissReason`] is initialized to zero on creation, so lookups never
/// miss. The join is single-threaded, so plain counters are enough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinStats {
    records: usize,
    matched: usize,
    unparseable: usize,
    misses: HashMap<MissReason, usize>,
}

impl Default for JoinStats {
    fn default() -> Self {
        Self::new()
    }
}

impl JoinStats {
    /// Creates zeroed statistics with every miss reason present.
    pub fn new() -> Self {
        let misses = MissReason::iter().map(|reason| (reason, 0)).collect();
        JoinStats {
            records: 0,
            matched: 0,
            unparseable: 0,
            misses,
        }
    }

    pub(crate) fn record_seen(&mut self, ip_parsed: bool) {
        self.records += 1;
        if !ip_parsed {
            self.unparseable += 1;
        }
    }

    pub(crate) fn increment_matched(&mut self) {
        self.matched += 1;
    }

    pub(crate) fn increment_miss(&mut self, reason: MissReason) {
        *self.misses.entry(reason).or_insert(0) += 1;
    }

    /// Records that entered the join.
    pub fn records(&self) -> usize {
        self.records
    }

    /// Records a range claimed.
    pub fn matched(&self) -> usize {
        self.matched
    }

    /// Records whose IP failed to normalize, whatever the policy did with them.
    pub fn unparseable(&self) -> usize {
        self.unparseable
    }

    /// Get the count for a miss reason.
    pub fn miss_count(&self, reason: MissReason) -> usize {
        self.misses.get(&reason).copied().unwrap_or(0)
    }

    /// Get total miss count across all reasons.
    pub fn total_misses(&self) -> usize {
        MissReason::iter().map(|r| self.miss_count(r)).sum()
    }

    /// Share of records left without a country, in percent.
    pub fn unmatched_pct(&self) -> f64 {
        if self.records == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let pct = (self.total_misses() as f64 / self.records as f64) * 100.0;
        pct
    }
}
