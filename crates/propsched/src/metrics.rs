//! Cumulative scheduler counters.
//!
//! [`SchedulerMetrics`] is updated on every mutation and read back by
//! value through [`Scheduler::metrics`](crate::Scheduler::metrics), for
//! telemetry and for checking coalescing efficiency under load.

/// Counters accumulated since the scheduler was constructed.
///
/// `clear()` discards pending work but does not reset these.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchedulerMetrics {
    /// Non-empty `(time, groups)` pairs placed, whether via `insert` or
    /// `insert_all`. An empty `groups` is accepted but not counted.
    pub insert_calls: u64,
    /// Update groups accepted.
    pub groups_inserted: u64,
    /// Update groups handed back by `remove_min` (or dropped by `clear`).
    pub groups_removed: u64,
    /// Inserts that opened a new bucket.
    pub buckets_created: u64,
    /// Inserts that appended to an already-live bucket.
    pub buckets_merged: u64,
    /// Buckets removed by `remove_min` or `clear`.
    pub buckets_removed: u64,
    /// Largest number of simultaneously live buckets observed.
    pub peak_buckets: u64,
    /// Calls refused because of an empty update group.
    pub rejected_inserts: u64,
}

impl SchedulerMetrics {
    /// Fraction of non-empty inserts that merged into an existing bucket.
    ///
    /// Returns 0.0 before the first insert.
    pub fn merge_ratio(&self) -> f64 {
        let placed = self.buckets_created + self.buckets_merged;
        if placed == 0 {
            return 0.0;
        }
        self.buckets_merged as f64 / placed as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = SchedulerMetrics::default();
        assert_eq!(m.insert_calls, 0);
        assert_eq!(m.groups_inserted, 0);
        assert_eq!(m.groups_removed, 0);
        assert_eq!(m.buckets_created, 0);
        assert_eq!(m.buckets_merged, 0);
        assert_eq!(m.buckets_removed, 0);
        assert_eq!(m.peak_buckets, 0);
        assert_eq!(m.rejected_inserts, 0);
        assert_eq!(m.merge_ratio(), 0.0);
    }

    #[test]
    fn merge_ratio_counts_placements() {
        let m = SchedulerMetrics {
            buckets_created: 1,
            buckets_merged: 3,
            ..Default::default()
        };
        assert_eq!(m.merge_ratio(), 0.75);
    }
}
