//! Immutable, time-ordered snapshot index.
//!
//! [`SnapshotIndex`] answers "most recent snapshot at or before `t`"
//! queries with a binary search over snapshots sorted by timestamp.
//!
//! # Invariants
//!
//! - Timestamps are strictly increasing. Duplicates are rejected at
//!   construction rather than silently overwritten.
//! - The index is never mutated after [`SnapshotIndex::build`] returns.
//!   Queries take `&self` and hand out shared references, so an index can
//!   be read from any number of tasks without locking.

use serde_json::Value;
use tracing::debug;

use crate::error::MalformedInputError;
use crate::snapshot::Snapshot;

/// Sorted, read-only collection of snapshots supporting point-in-time lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotIndex<P = Value> {
    /// Snapshots in strictly ascending timestamp order.
    snapshots: Vec<Snapshot<P>>,
}

/// Build a [`SnapshotIndex`] from an unordered collection of snapshots.
///
/// Shorthand for [`SnapshotIndex::build`].
///
/// # Errors
///
/// Returns [`MalformedInputError::DuplicateTimestamp`] if two snapshots
/// share a timestamp.
pub fn build_index<P, I>(records: I) -> Result<SnapshotIndex<P>, MalformedInputError>
where
    I: IntoIterator<Item = Snapshot<P>>,
{
    SnapshotIndex::build(records)
}

impl<P> SnapshotIndex<P> {
    /// Sort and validate `records` into an index.
    ///
    /// Input order does not matter. An empty input produces an empty index
    /// on which every query returns `None`.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedInputError::DuplicateTimestamp`] for the first
    /// (lowest) timestamp that occurs more than once.
    pub fn build<I>(records: I) -> Result<Self, MalformedInputError>
    where
        I: IntoIterator<Item = Snapshot<P>>,
    {
        let mut snapshots: Vec<Snapshot<P>> = records.into_iter().collect();
        snapshots.sort_unstable_by_key(|snapshot| snapshot.timestamp);

        for pair in snapshots.windows(2) {
            if let [earlier, later] = pair
                && earlier.timestamp == later.timestamp
            {
                return Err(MalformedInputError::DuplicateTimestamp {
                    timestamp: later.timestamp,
                });
            }
        }

        let index = Self { snapshots };
        debug!(
            snapshots = index.len(),
            earliest = index.earliest().map(|s| s.timestamp),
            latest = index.latest().map(|s| s.timestamp),
            "Snapshot index built"
        );
        Ok(index)
    }

    /// Return the snapshot with the largest timestamp `<= query_ts`.
    ///
    /// - An exact timestamp match returns that snapshot.
    /// - Queries past the last snapshot return the last snapshot; data
    ///   never expires going forward.
    /// - Returns `None` when `query_ts` precedes every snapshot, including
    ///   when the index is empty.
    pub fn find_at_or_before(&self, query_ts: i64) -> Option<&Snapshot<P>> {
        // Number of snapshots with timestamp <= query_ts; the match is the
        // last of those.
        let at_or_before = self
            .snapshots
            .partition_point(|snapshot| snapshot.timestamp <= query_ts);
        at_or_before
            .checked_sub(1)
            .and_then(|position| self.snapshots.get(position))
    }

    /// Return the snapshot current as of `now` (epoch seconds).
    ///
    /// `now` comes from the caller's clock so lookups stay deterministic.
    pub fn find_current(&self, now: i64) -> Option<&Snapshot<P>> {
        self.find_at_or_before(now)
    }

    /// Number of snapshots in the index.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the index holds no snapshots.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The snapshot with the smallest timestamp.
    pub fn earliest(&self) -> Option<&Snapshot<P>> {
        self.snapshots.first()
    }

    /// The snapshot with the largest timestamp.
    pub fn latest(&self) -> Option<&Snapshot<P>> {
        self.snapshots.last()
    }

    /// Iterate over snapshots in ascending timestamp order.
    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot<P>> {
        self.snapshots.iter()
    }
}

impl<'a, P> IntoIterator for &'a SnapshotIndex<P> {
    type Item = &'a Snapshot<P>;
    type IntoIter = std::slice::Iter<'a, Snapshot<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::panic, clippy::arithmetic_side_effects)]

    use super::*;

    const FIRST_TS: i64 = 1_592_078_400;
    const STEP: i64 = 60;
    const LAST_TS: i64 = 1_592_079_360;

    /// Sixteen snapshots, payload is the 1-based ordinal. The first fifteen
    /// are one minute apart; the last follows a two-minute gap.
    fn minute_snapshots() -> Vec<Snapshot<u32>> {
        (0..15_u32)
            .map(|n| Snapshot::new(FIRST_TS + i64::from(n) * STEP, n + 1))
            .chain(std::iter::once(Snapshot::new(LAST_TS, 16)))
            .collect()
    }

    fn minute_index() -> SnapshotIndex<u32> {
        build_index(minute_snapshots()).unwrap_or_else(|e| panic!("valid fixture: {e}"))
    }

    fn timestamp_at(index: &SnapshotIndex<u32>, query_ts: i64) -> Option<i64> {
        index.find_at_or_before(query_ts).map(|s| s.timestamp)
    }

    #[test]
    fn fixture_spans_sixteen_minutes() {
        let index = minute_index();
        assert_eq!(index.len(), 16);
        assert_eq!(index.earliest().map(|s| s.timestamp), Some(FIRST_TS));
        assert_eq!(index.latest().map(|s| s.timestamp), Some(LAST_TS));
    }

    #[test]
    fn exact_first_timestamp_returns_first() {
        assert_eq!(timestamp_at(&minute_index(), 1_592_078_400), Some(1_592_078_400));
    }

    #[test]
    fn just_after_first_returns_first() {
        assert_eq!(timestamp_at(&minute_index(), 1_592_078_401), Some(1_592_078_400));
    }

    #[test]
    fn just_before_second_returns_first() {
        assert_eq!(timestamp_at(&minute_index(), 1_592_078_459), Some(1_592_078_400));
    }

    #[test]
    fn exact_second_timestamp_returns_second() {
        let index = minute_index();
        let snapshot = index.find_at_or_before(1_592_078_460);
        assert_eq!(snapshot.map(|s| (s.timestamp, s.payload)), Some((1_592_078_460, 2)));
    }

    #[test]
    fn exact_fifth_timestamp_returns_fifth() {
        let index = minute_index();
        let snapshot = index.find_at_or_before(1_592_078_640);
        assert_eq!(snapshot.map(|s| s.payload), Some(5));
    }

    #[test]
    fn query_inside_final_gap_returns_fifteenth() {
        let index = minute_index();
        let snapshot = index.find_at_or_before(LAST_TS - STEP);
        assert_eq!(
            snapshot.map(|s| (s.timestamp, s.payload)),
            Some((1_592_079_240, 15))
        );
        assert_eq!(timestamp_at(&index, LAST_TS - 1), Some(1_592_079_240));
        assert_eq!(timestamp_at(&index, LAST_TS), Some(LAST_TS));
    }

    #[test]
    fn far_future_returns_last() {
        assert_eq!(timestamp_at(&minute_index(), 1_599_078_460), Some(LAST_TS));
        assert_eq!(timestamp_at(&minute_index(), i64::MAX), Some(LAST_TS));
    }

    #[test]
    fn before_first_is_not_found() {
        let index = minute_index();
        assert_eq!(timestamp_at(&index, 555), None);
        assert_eq!(timestamp_at(&index, FIRST_TS - 1), None);
        assert_eq!(timestamp_at(&index, i64::MIN), None);
    }

    #[test]
    fn empty_index_is_always_not_found() {
        let index = build_index(Vec::<Snapshot<u32>>::new())
            .unwrap_or_else(|e| panic!("empty input is valid: {e}"));
        assert!(index.is_empty());
        assert_eq!(index.find_at_or_before(0), None);
        assert_eq!(index.find_at_or_before(i64::MAX), None);
        assert_eq!(index.find_current(FIRST_TS), None);
        assert!(index.earliest().is_none());
    }

    #[test]
    fn single_snapshot_index() {
        let index = build_index(vec![Snapshot::new(100, "only")])
            .unwrap_or_else(|e| panic!("valid input: {e}"));
        assert_eq!(index.find_at_or_before(99), None);
        assert_eq!(index.find_at_or_before(100).map(|s| s.payload), Some("only"));
        assert_eq!(index.find_at_or_before(101).map(|s| s.payload), Some("only"));
    }

    #[test]
    fn unordered_input_is_sorted() {
        let mut shuffled = minute_snapshots();
        shuffled.reverse();
        shuffled.swap(3, 11);
        let index = build_index(shuffled).unwrap_or_else(|e| panic!("valid input: {e}"));

        assert_eq!(index, minute_index());
        let timestamps: Vec<i64> = index.iter().map(|s| s.timestamp).collect();
        assert!(timestamps.windows(2).all(|w| w.first() < w.last()));
    }

    #[test]
    fn duplicate_timestamp_is_rejected() {
        let mut records = minute_snapshots();
        records.push(Snapshot::new(1_592_078_640, 99));
        assert_eq!(
            build_index(records),
            Err(MalformedInputError::DuplicateTimestamp {
                timestamp: 1_592_078_640
            })
        );
    }

    #[test]
    fn negative_timestamps_are_ordered() {
        let index = build_index(vec![
            Snapshot::new(10, 'c'),
            Snapshot::new(-10, 'a'),
            Snapshot::new(0, 'b'),
        ])
        .unwrap_or_else(|e| panic!("valid input: {e}"));
        assert_eq!(index.find_at_or_before(-11), None);
        assert_eq!(index.find_at_or_before(-1).map(|s| s.payload), Some('a'));
        assert_eq!(index.find_at_or_before(5).map(|s| s.payload), Some('b'));
    }

    #[test]
    fn find_current_matches_find_at_or_before() {
        let index = minute_index();
        for now in [555, FIRST_TS, FIRST_TS + 1, 1_592_078_700, LAST_TS, LAST_TS + 1] {
            assert_eq!(index.find_current(now), index.find_at_or_before(now));
        }
    }

    #[test]
    fn every_snapshot_is_found_at_its_own_timestamp() {
        let index = minute_index();
        for snapshot in &index {
            assert_eq!(index.find_at_or_before(snapshot.timestamp), Some(snapshot));
        }
    }

    #[test]
    fn result_is_the_latest_snapshot_not_after_query() {
        let index = minute_index();
        for query_ts in (FIRST_TS - 5 * STEP)..=(LAST_TS + 5 * STEP) {
            let expected = index.iter().rev().find(|s| s.timestamp <= query_ts);
            let found = index.find_at_or_before(query_ts);
            assert_eq!(found, expected, "query {query_ts}");
            if let Some(snapshot) = found {
                assert!(snapshot.timestamp <= query_ts);
            }
        }
    }

    #[test]
    fn repeated_queries_are_deterministic() {
        let index = minute_index();
        let first = index.find_at_or_before(1_592_078_999);
        for _ in 0..10 {
            assert_eq!(index.find_at_or_before(1_592_078_999), first);
        }
    }
}
