//! Join options and result types.

use crate::config::{JoinMode, UnparseablePolicy};
use crate::error_handling::JoinStats;
use crate::normalize::{IpInt, Record};
use crate::ranges::IpRange;

/// Knobs of a join. The default reproduces plain filtering semantics with
/// the sentinel policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinOptions {
    /// Drop or keep unmatched records
    pub mode: JoinMode,
    /// How failed normalizations take part
    pub unparseable: UnparseablePolicy,
}

/// A record paired with the range that contains it.
///
/// `range` is `None` only in [`JoinMode::Left`] output. When present,
/// `range.lower_bound <= record.ip_int() <= range.upper_bound` holds.
#[derive(Debug)]
pub struct JoinedRecord<'a, T> {
    record: &'a Record<T>,
    range: Option<&'a IpRange>,
}

// Manual impls: a derive would demand T: Clone / T: Copy
impl<T> Clone for JoinedRecord<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for JoinedRecord<'_, T> {}

impl<'a, T> JoinedRecord<'a, T> {
    pub(crate) fn new(record: &'a Record<T>, range: Option<&'a IpRange>) -> Self {
        Self { record, range }
    }

    /// The input record, untouched.
    pub fn record(&self) -> &'a Record<T> {
        self.record
    }

    /// The containing range, if any.
    pub fn range(&self) -> Option<&'a IpRange> {
        self.range
    }

    /// Normalized IP of the record.
    pub fn ip_int(&self) -> IpInt {
        self.record.ip_int()
    }

    /// Whether a range contains the record.
    pub fn is_matched(&self) -> bool {
        self.range.is_some()
    }

    /// Country label of the containing range.
    pub fn country(&self) -> Option<&'a str> {
        self.range.map(|r| r.country.as_str())
    }

    /// Lower bound of the containing range.
    pub fn lower_bound(&self) -> Option<IpInt> {
        self.range.map(|r| r.lower_bound)
    }

    /// Upper bound of the containing range.
    pub fn upper_bound(&self) -> Option<IpInt> {
        self.range.map(|r| r.upper_bound)
    }
}

/// Joined rows in ascending `ip_int` order, plus the run's statistics.
#[derive(Debug)]
pub struct JoinOutcome<'a, T> {
    /// Output rows
    pub rows: Vec<JoinedRecord<'a, T>>,
    /// Match and miss counts
    pub stats: JoinStats,
}
