//! Sorted, validated range table with floor and containment lookups.

use log::{debug, warn};

use crate::config::RangeValidation;
use crate::error_handling::RangeTableError;
use crate::normalize::IpInt;

/// One row of the IP-to-country table: an inclusive integer range and its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpRange {
    /// Inclusive lower bound
    pub lower_bound: IpInt,
    /// Inclusive upper bound
    pub upper_bound: IpInt,
    /// Country label
    pub country: String,
}

impl IpRange {
    /// Builds a range; bounds are validated by [`RangeTable::new`].
    pub fn new(lower_bound: IpInt, upper_bound: IpInt, country: impl Into<String>) -> Self {
        Self {
            lower_bound,
            upper_bound,
            country: country.into(),
        }
    }

    /// Whether `lower_bound <= ip <= upper_bound`.
    pub fn contains(&self, ip: IpInt) -> bool {
        self.lower_bound <= ip && ip <= self.upper_bound
    }
}

/// Range rows sorted ascending by `lower_bound`.
///
/// Built once per join and never mutated afterwards. In strict mode the rows
/// are guaranteed well-formed and pairwise disjoint.
#[derive(Debug, Clone, Default)]
pub struct RangeTable {
    ranges: Vec<IpRange>,
}

impl RangeTable {
    /// Sorts `ranges` by lower bound and validates them.
    ///
    /// # Errors
    ///
    /// With [`RangeValidation::Strict`], returns
    /// [`RangeTableError::InvertedBounds`] for the first range whose bounds are
    /// inverted and [`RangeTableError::Overlap`] for the first adjacent pair
    /// sharing an address. With [`RangeValidation::Lenient`] the same problems
    /// are logged and the rows kept.
    pub fn new(
        mut ranges: Vec<IpRange>,
        validation: RangeValidation,
    ) -> Result<Self, RangeTableError> {
        ranges.sort_by_key(|r| r.lower_bound);

        let mut inverted = 0usize;
        for range in ranges.iter().filter(|r| r.lower_bound > r.upper_bound) {
            if validation == RangeValidation::Strict {
                return Err(RangeTableError::InvertedBounds {
                    lower_bound: range.lower_bound,
                    upper_bound: range.upper_bound,
                    country: range.country.clone(),
                });
            }
            inverted += 1;
        }

        let mut overlaps = 0usize;
        for pair in ranges.windows(2) {
            let (first, second) = (&pair[0], &pair[1]);
            if second.lower_bound <= first.upper_bound {
                if validation == RangeValidation::Strict {
                    return Err(RangeTableError::Overlap {
                        first_lower: first.lower_bound,
                        first_upper: first.upper_bound,
                        first_country: first.country.clone(),
                        second_lower: second.lower_bound,
                        second_upper: second.upper_bound,
                        second_country: second.country.clone(),
                    });
                }
                overlaps += 1;
            }
        }

        if inverted > 0 {
            warn!(
                "Range table has {} range(s) with inverted bounds; they can never match",
                inverted
            );
        }
        if overlaps > 0 {
            warn!(
                "Range table has {} overlapping adjacent pair(s); the range with the larger lower bound wins",
                overlaps
            );
        }
        debug!("Range table ready: {} ranges", ranges.len());

        Ok(Self { ranges })
    }

    /// Number of ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Whether the table has no ranges.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Ranges in ascending `lower_bound` order.
    pub fn ranges(&self) -> &[IpRange] {
        &self.ranges
    }

    /// Position of the backward-nearest range: the last one whose
    /// `lower_bound <= ip`.
    pub(crate) fn floor_index(&self, ip: IpInt) -> Option<usize> {
        self.ranges
            .partition_point(|r| r.lower_bound <= ip)
            .checked_sub(1)
    }

    /// The range with the largest `lower_bound <= ip`, whether or not it
    /// actually contains `ip`.
    pub fn floor(&self, ip: IpInt) -> Option<&IpRange> {
        self.floor_index(ip).map(|i| &self.ranges[i])
    }

    /// The range containing `ip`, if any. One binary search.
    pub fn find(&self, ip: IpInt) -> Option<&IpRange> {
        self.floor(ip).filter(|r| ip <= r.upper_bound)
    }
}
