//! Sorted-merge interval-containment join.
//!
//! Records are sorted by `ip_int`; the range table is already sorted by
//! `lower_bound`. One forward pass keeps a cursor on the ranges so that, for
//! each record, the backward-nearest range is the one just before the cursor.
//! The candidate is accepted only if the record also lies at or below its
//! upper bound.

use log::{debug, info};

use crate::config::{JoinMode, UnparseablePolicy};
use crate::error_handling::{JoinStats, MissReason};
use crate::normalize::{IpInt, Record};
use crate::ranges::{IpRange, RangeTable};

use super::types::{JoinOptions, JoinOutcome, JoinedRecord};

/// Applies the containment filter to the backward-nearest candidate.
///
/// `floor_end` is the number of ranges whose `lower_bound <= ip`.
fn classify(ranges: &[IpRange], floor_end: usize, ip: IpInt) -> Result<&IpRange, MissReason> {
    if ranges.is_empty() {
        return Err(MissReason::EmptyRangeTable);
    }
    let candidate = floor_end
        .checked_sub(1)
        .map(|i| &ranges[i])
        .ok_or(MissReason::BelowAllRanges)?;
    if ip <= candidate.upper_bound {
        Ok(candidate)
    } else {
        Err(MissReason::InGap)
    }
}

/// Resolves a single IP against the table with one binary search.
///
/// Returns the containing range, or why there is none.
pub fn resolve(table: &RangeTable, ip: IpInt) -> Result<&IpRange, MissReason> {
    let floor_end = table.floor_index(ip).map_or(0, |i| i + 1);
    classify(table.ranges(), floor_end, ip)
}

/// Joins records against the range table with the default options: misses
/// are dropped and failed normalizations join as `0`.
///
/// Every returned row satisfies `lower_bound <= ip_int <= upper_bound`.
pub fn join<'a, T>(records: &'a [Record<T>], table: &'a RangeTable) -> Vec<JoinedRecord<'a, T>> {
    join_with(records, table, &JoinOptions::default()).rows
}

/// Joins records against the range table.
///
/// Output is in ascending `ip_int` order; records with equal `ip_int` keep
/// their input order. Neither input is modified.
pub fn join_with<'a, T>(
    records: &'a [Record<T>],
    table: &'a RangeTable,
    options: &JoinOptions,
) -> JoinOutcome<'a, T> {
    info!(
        "Joining {} records against {} ranges",
        records.len(),
        table.len()
    );

    let mut sorted: Vec<&'a Record<T>> = records.iter().collect();
    // Stable: ties stay in input order
    sorted.sort_by_key(|r| r.ip_int());

    let ranges = table.ranges();
    let mut stats = JoinStats::new();
    let mut rows = Vec::with_capacity(records.len());
    let mut cursor = 0usize;

    for record in sorted {
        stats.record_seen(record.ip_parsed());

        let resolved = if !record.ip_parsed() && options.unparseable == UnparseablePolicy::Unmatched
        {
            Err(MissReason::UnparseableIp)
        } else {
            let ip = record.ip_int();
            while cursor < ranges.len() && ranges[cursor].lower_bound <= ip {
                cursor += 1;
            }
            classify(ranges, cursor, ip)
        };

        match resolved {
            Ok(range) => {
                stats.increment_matched();
                rows.push(JoinedRecord::new(record, Some(range)));
            }
            Err(reason) => {
                stats.increment_miss(reason);
                if options.mode == JoinMode::Left {
                    rows.push(JoinedRecord::new(record, None));
                }
            }
        }
    }

    debug!(
        "Join finished: {} matched, {} unmatched, {} unparseable",
        stats.matched(),
        stats.total_misses(),
        stats.unparseable()
    );

    JoinOutcome { rows, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RangeValidation;
    use crate::normalize::IpValue;
    use proptest::prelude::*;

    fn table(rows: &[(IpInt, IpInt, &str)]) -> RangeTable {
        let ranges = rows
            .iter()
            .map(|&(lo, hi, c)| IpRange::new(lo, hi, c))
            .collect();
        RangeTable::new(ranges, RangeValidation::Strict).expect("valid table")
    }

    fn au_table() -> RangeTable {
        table(&[(16_777_216, 16_777_471, "AU")])
    }

    #[test]
    fn test_dotted_quad_matches_range() {
        let records = vec![Record::new("1.0.0.5", "row-1")];
        let t = au_table();
        let rows = join(&records, &t);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ip_int(), 16_777_221);
        assert_eq!(rows[0].country(), Some("AU"));
        assert!(rows[0].is_matched());
        assert_eq!(rows[0].lower_bound(), Some(16_777_216));
        assert_eq!(rows[0].upper_bound(), Some(16_777_471));
        assert_eq!(*rows[0].record().data(), "row-1");
    }

    #[test]
    fn test_address_outside_every_range_is_dropped() {
        let records = vec![Record::new("9.9.9.9", ())];
        let t = au_table();
        assert!(join(&records, &t).is_empty());
    }

    #[test]
    fn test_sentinel_collides_with_range_starting_at_zero() {
        // Known behavior: an unparseable IP normalizes to 0 and is claimed by
        // a range whose lower bound is 0.
        let records = vec![Record::new("not-an-ip", ())];
        let t = table(&[(0, 100, "ZZ")]);
        let rows = join(&records, &t);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ip_int(), 0);
        assert_eq!(rows[0].country(), Some("ZZ"));
    }

    #[test]
    fn test_unmatched_policy_avoids_sentinel_collision() {
        let records = vec![Record::new("not-an-ip", ()), Record::new("0.0.0.7", ())];
        let t = table(&[(0, 100, "ZZ")]);
        let outcome = join_with(
            &records,
            &t,
            &JoinOptions {
                unparseable: UnparseablePolicy::Unmatched,
                ..Default::default()
            },
        );

        // The genuine 0.0.0.7 still matches
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0].ip_int(), 7);
        assert_eq!(outcome.stats.miss_count(MissReason::UnparseableIp), 1);
        assert_eq!(outcome.stats.unparseable(), 1);
    }

    #[test]
    fn test_gap_rejection() {
        let t = table(&[(10, 20, "A"), (30, 40, "B")]);
        let records = vec![Record::new(25u32, ()), Record::new(21u32, ()), Record::new(29u32, ())];
        let outcome = join_with(&records, &t, &JoinOptions::default());

        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.stats.miss_count(MissReason::InGap), 3);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let t = table(&[(10, 20, "A")]);
        let records = vec![Record::new(10u32, ()), Record::new(20u32, ())];
        let rows = join(&records, &t);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.country() == Some("A")));
    }

    #[test]
    fn test_below_all_ranges() {
        let t = table(&[(10, 20, "A")]);
        let records = vec![Record::new(9u32, ())];
        let outcome = join_with(&records, &t, &JoinOptions::default());
        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.stats.miss_count(MissReason::BelowAllRanges), 1);
    }

    #[test]
    fn test_empty_range_table_yields_empty_output() {
        let t = table(&[]);
        let records = vec![Record::new("1.0.0.5", ()), Record::new("not-an-ip", ())];
        let outcome = join_with(&records, &t, &JoinOptions::default());
        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.stats.miss_count(MissReason::EmptyRangeTable), 2);
    }

    #[test]
    fn test_empty_records() {
        let records: Vec<Record<()>> = Vec::new();
        let t = au_table();
        let outcome = join_with(&records, &t, &JoinOptions::default());
        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.stats.records(), 0);
    }

    #[test]
    fn test_left_mode_keeps_every_record() {
        let t = table(&[(10, 20, "A")]);
        let records = vec![
            Record::new(50u32, "gap"),
            Record::new(15u32, "hit"),
            Record::new(IpValue::Missing, "missing"),
        ];
        let outcome = join_with(
            &records,
            &t,
            &JoinOptions {
                mode: JoinMode::Left,
                ..Default::default()
            },
        );

        let summary: Vec<_> = outcome
            .rows
            .iter()
            .map(|r| (*r.record().data(), r.country()))
            .collect();
        assert_eq!(
            summary,
            vec![("missing", None), ("hit", Some("A")), ("gap", None)]
        );
        let matched: Vec<bool> = outcome.rows.iter().map(|r| r.is_matched()).collect();
        assert_eq!(matched, vec![false, true, false]);
        assert_eq!(outcome.stats.matched(), 1);
        assert_eq!(outcome.stats.total_misses(), 2);
    }

    #[test]
    fn test_output_sorted_and_ties_keep_input_order() {
        let t = table(&[(0, 1_000, "A")]);
        let records = vec![
            Record::new(500u32, "c"),
            Record::new(100u32, "a"),
            Record::new(500u32, "d"),
            Record::new(100u32, "b"),
        ];
        let rows = join(&records, &t);
        let order: Vec<_> = rows.iter().map(|r| *r.record().data()).collect();
        assert_eq!(order, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_inputs_untouched() {
        let t = au_table();
        let records = vec![Record::new("9.9.9.9", 2), Record::new("1.0.0.5", 1)];
        let before = records.clone();
        let _ = join(&records, &t);
        assert_eq!(records, before);
    }

    #[test]
    fn test_resolve_single_ip() {
        let t = table(&[(10, 20, "A"), (30, 40, "B")]);
        assert_eq!(resolve(&t, 5), Err(MissReason::BelowAllRanges));
        assert_eq!(resolve(&t, 15).map(|r| r.country.as_str()), Ok("A"));
        assert_eq!(resolve(&t, 25), Err(MissReason::InGap));
        assert_eq!(resolve(&t, 99), Err(MissReason::InGap));
        assert_eq!(resolve(&table(&[]), 5), Err(MissReason::EmptyRangeTable));
    }

    /// Disjoint ranges built from (gap, length) steps, so every range starts
    /// strictly after the previous one ends.
    fn disjoint_ranges() -> impl Strategy<Value = Vec<IpRange>> {
        prop::collection::vec((1u32..500, 0u32..500), 0..40).prop_map(|steps| {
            let mut next_start: IpInt = 0;
            steps
                .into_iter()
                .enumerate()
                .map(|(i, (gap, len))| {
                    let lower = next_start + IpInt::from(gap);
                    let upper = lower + IpInt::from(len);
                    next_start = upper + 1;
                    IpRange::new(lower, upper, format!("C{i}"))
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn test_containment_invariant(
            ranges in disjoint_ranges(),
            points in prop::collection::vec(0u32..25_000, 0..200),
        ) {
            let t = RangeTable::new(ranges.clone(), RangeValidation::Strict)
                .expect("generated ranges are disjoint");
            let records: Vec<_> = points.iter().map(|&p| Record::new(p, p)).collect();
            let rows = join(&records, &t);

            for row in &rows {
                let range = row.range().expect("inner join rows are matched");
                prop_assert!(range.lower_bound <= row.ip_int());
                prop_assert!(row.ip_int() <= range.upper_bound);
            }

            // Every dropped point truly lies in a gap or below all ranges
            let contained = |p: u32| ranges.iter().any(|r| r.contains(IpInt::from(p)));
            let expected = points.iter().filter(|&&p| contained(p)).count();
            prop_assert_eq!(rows.len(), expected);
        }

        #[test]
        fn test_merge_pass_agrees_with_binary_search(
            ranges in disjoint_ranges(),
            points in prop::collection::vec(0u32..25_000, 0..200),
        ) {
            let t = RangeTable::new(ranges, RangeValidation::Strict)
                .expect("generated ranges are disjoint");
            let records: Vec<_> = points.iter().map(|&p| Record::new(p, ())).collect();
            let outcome = join_with(
                &records,
                &t,
                &JoinOptions { mode: JoinMode::Left, ..Default::default() },
            );

            prop_assert_eq!(outcome.rows.len(), records.len());
            for row in &outcome.rows {
                let searched = resolve(&t, row.ip_int()).ok();
                prop_assert_eq!(row.range(), searched);
                prop_assert_eq!(row.range(), t.find(row.ip_int()));
            }
            prop_assert_eq!(
                outcome.stats.matched() + outcome.stats.total_misses(),
                records.len()
            );
        }

        #[test]
        fn test_output_is_sorted(
            ranges in disjoint_ranges(),
            points in prop::collection::vec(0u32..25_000, 0..200),
        ) {
            let t = RangeTable::new(ranges, RangeValidation::Strict)
                .expect("generated ranges are disjoint");
            let records: Vec<_> = points.iter().map(|&p| Record::new(p, ())).collect();
            let rows = join(&records, &t);
            prop_assert!(rows.windows(2).all(|w| w[0].ip_int() <= w[1].ip_int()));
        }
    }
}
