//! The scheduler façade.
//!
//! [`Scheduler`] ties the bucket store, the active-identifier index and
//! the metrics together. Every method is synchronous and runs to
//! completion; see [`SharedScheduler`](crate::SharedScheduler) for use
//! from several threads.

use std::fmt;

use tracing::{debug, trace};

use crate::active::ActiveIndex;
use crate::config::{EmptyGroupPolicy, SchedulerConfig};
use crate::error::ScheduleError;
use crate::group::{NodeId, UpdateGroup};
use crate::metrics::SchedulerMetrics;
use crate::store::{Bucket, BucketStore, Placement};
use crate::time::{LogicalTime, Time};

/// Time-ordered, merge-on-insert store of pending update groups.
///
/// Groups inserted at equal times share one bucket; [`remove_min`]
/// hands buckets back in ascending time order. The number of live
/// buckets is bounded by the number of distinct pending times, not by
/// the number of inserts.
///
/// ```
/// use propsched::{NodeId, Scheduler, Time};
///
/// let mut sched = Scheduler::new();
/// let t1 = Time::new(1.0).unwrap();
/// sched.insert(t1, [[1, 2, 3]]).unwrap();
/// sched.insert(t1, [[4, 5, 6]]).unwrap();
/// assert_eq!(sched.size(), 1);
/// assert_eq!(sched.active(), vec![NodeId(3), NodeId(6)]);
///
/// let bucket = sched.remove_min().unwrap();
/// assert_eq!(bucket.time(), t1);
/// assert_eq!(bucket.len(), 2);
/// assert!(sched.remove_min().is_none());
/// ```
///
/// [`remove_min`]: Scheduler::remove_min
pub struct Scheduler<T = Time> {
    config: SchedulerConfig,
    store: BucketStore<T>,
    active: ActiveIndex,
    metrics: SchedulerMetrics,
}

impl<T: LogicalTime> Scheduler<T> {
    /// Create an empty scheduler with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    /// Create an empty scheduler with the given configuration.
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            store: BucketStore::with_capacity(config.initial_buckets),
            active: ActiveIndex::new(),
            metrics: SchedulerMetrics::default(),
            config,
        }
    }

    /// Schedule `groups` to fire at `time`.
    ///
    /// If a bucket for `time` is live the groups are appended to it in
    /// order; otherwise a new bucket is opened. An empty `groups` is a
    /// no-op. Under [`EmptyGroupPolicy::Reject`] a zero-length group fails
    /// the whole call and nothing is scheduled.
    pub fn insert<G>(&mut self, time: T, groups: G) -> Result<(), ScheduleError>
    where
        G: IntoIterator,
        G::Item: Into<UpdateGroup>,
    {
        let groups: Vec<UpdateGroup> = groups.into_iter().map(Into::into).collect();
        self.check_groups(0, &groups)?;
        self.place(time, groups);
        Ok(())
    }

    /// Schedule every `(time, groups)` pair in order.
    ///
    /// Equivalent to calling [`insert`](Self::insert) once per pair,
    /// except that validation covers the whole batch first: if any pair
    /// is rejected, none of the batch is scheduled.
    pub fn insert_all<I, G>(&mut self, entries: I) -> Result<(), ScheduleError>
    where
        I: IntoIterator<Item = (T, G)>,
        G: IntoIterator,
        G::Item: Into<UpdateGroup>,
    {
        let entries: Vec<(T, Vec<UpdateGroup>)> = entries
            .into_iter()
            .map(|(time, groups)| (time, groups.into_iter().map(Into::into).collect()))
            .collect();

        for (i, (_, groups)) in entries.iter().enumerate() {
            self.check_groups(i, groups)?;
        }

        let count = entries.len();
        for (time, groups) in entries {
            self.place(time, groups);
        }
        debug!(entries = count, buckets = self.size(), "batch scheduled");
        Ok(())
    }

    /// Remove the bucket with the smallest time and return it.
    ///
    /// Returns `None` when nothing is scheduled; that is the normal
    /// end-of-work signal, not an error.
    pub fn remove_min(&mut self) -> Option<Bucket<T>> {
        let bucket = self.store.pop_min()?;
        for group in bucket.groups() {
            self.active.remove(group);
        }
        self.metrics.buckets_removed += 1;
        self.metrics.groups_removed += bucket.len() as u64;
        trace!(time = ?bucket.time(), groups = bucket.len(), "bucket fired");
        Some(bucket)
    }

    /// Number of live buckets, i.e. distinct pending times.
    pub fn size(&self) -> usize {
        self.store.len()
    }

    /// Whether nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// The time [`remove_min`](Self::remove_min) would return next.
    pub fn peek_time(&self) -> Option<T> {
        self.store.peek_min()
    }

    /// Total update groups across every live bucket.
    pub fn pending_groups(&self) -> usize {
        self.store.pending_groups()
    }

    /// Distinct active identifiers across every pending group, ascending.
    ///
    /// Empty groups kept under [`EmptyGroupPolicy::Keep`] contribute
    /// nothing. Builds and sorts a fresh `Vec` on each call, O(k log k)
    /// for k distinct identifiers; prefer [`is_active`](Self::is_active)
    /// or [`active_count`](Self::active_count), both O(1), on hot paths.
    pub fn active(&self) -> Vec<NodeId> {
        self.active.sorted()
    }

    /// Whether some pending group ends at `id`.
    pub fn is_active(&self, id: NodeId) -> bool {
        self.active.contains(id)
    }

    /// Number of distinct active identifiers.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of pending groups whose active identifier is `id`.
    pub fn pending_for(&self, id: NodeId) -> usize {
        self.active.count(id)
    }

    /// The live bucket for `time`, if any.
    pub fn get(&self, time: T) -> Option<&Bucket<T>> {
        self.store.get(&time)
    }

    /// Every live bucket, in no particular order.
    pub fn buckets(&self) -> impl Iterator<Item = &Bucket<T>> {
        self.store.iter()
    }

    /// Iterate buckets in ascending time order, removing each one.
    ///
    /// Lazy: buckets not reached before the iterator is dropped stay
    /// scheduled.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { scheduler: self }
    }

    /// Discard every pending bucket and group.
    ///
    /// Counters in [`metrics`](Self::metrics) keep accumulating.
    pub fn clear(&mut self) {
        let buckets = self.store.len();
        let groups = self.store.pending_groups();
        self.store.clear();
        self.active.clear();
        self.metrics.buckets_removed += buckets as u64;
        self.metrics.groups_removed += groups as u64;
        debug!(buckets, groups, "scheduler cleared");
    }

    /// The configuration this scheduler was built with.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Snapshot of the cumulative counters.
    pub fn metrics(&self) -> SchedulerMetrics {
        self.metrics.clone()
    }

    fn check_groups(&mut self, entry: usize, groups: &[UpdateGroup]) -> Result<(), ScheduleError> {
        if self.config.empty_groups == EmptyGroupPolicy::Keep {
            return Ok(());
        }
        match groups.iter().position(UpdateGroup::is_empty) {
            Some(group) => {
                self.metrics.rejected_inserts += 1;
                debug!(entry, group, "rejected empty update group");
                Err(ScheduleError::EmptyGroup { entry, group })
            }
            None => Ok(()),
        }
    }

    fn place(&mut self, time: T, groups: Vec<UpdateGroup>) {
        if groups.is_empty() {
            return;
        }
        for group in &groups {
            self.active.add(group);
        }
        self.metrics.insert_calls += 1;
        self.metrics.groups_inserted += groups.len() as u64;

        match self.store.insert(time, groups) {
            Placement::Created => {
                self.metrics.buckets_created += 1;
                let live = self.store.len() as u64;
                self.metrics.peak_buckets = self.metrics.peak_buckets.max(live);
                trace!(time = ?time, "bucket opened");
            }
            Placement::Merged => self.metrics.buckets_merged += 1,
        }
    }
}

impl<T: LogicalTime> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: LogicalTime> fmt::Debug for Scheduler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("buckets", &self.store.len())
            .field("pending_groups", &self.store.pending_groups())
            .field("next_time", &self.store.peek_min())
            .field("config", &self.config)
            .finish()
    }
}

/// Iterator returned by [`Scheduler::drain`].
pub struct Drain<'a, T: LogicalTime> {
    scheduler: &'a mut Scheduler<T>,
}

impl<T: LogicalTime> Iterator for Drain<'_, T> {
    type Item = Bucket<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.scheduler.remove_min()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.scheduler.size();
        (n, Some(n))
    }
}

impl<T: LogicalTime> ExactSizeIterator for Drain<'_, T> {}
