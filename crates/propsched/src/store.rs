//! Time-keyed bucket storage with merge-on-insert.
//!
//! `BucketStore` keeps one [`Bucket`] per distinct logical time. It is
//! an arena plus two indices:
//!
//! ```text
//! BucketStore
//! ├── slots: Vec<Option<Bucket>>   (arena; freed slots go on free_list)
//! ├── index: IndexMap<T, slot>     (locate-by-time for merging)
//! └── heap:  BinaryHeap<Reverse<T>> (each live time exactly once)
//! ```
//!
//! A time enters the heap only when its bucket is created and leaves it
//! only when that bucket is popped, so the heap never carries stale
//! entries and needs no lazy-deletion pass.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use indexmap::IndexMap;

use crate::group::UpdateGroup;
use crate::time::LogicalTime;

/// All update groups scheduled for one logical time.
///
/// Groups are kept in the order they were inserted, across every merged
/// `insert` call that landed on this time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bucket<T> {
    time: T,
    groups: Vec<UpdateGroup>,
}

impl<T: Copy> Bucket<T> {
    /// The time this bucket fires at.
    pub fn time(&self) -> T {
        self.time
    }

    /// The scheduled groups, oldest insertion first.
    pub fn groups(&self) -> &[UpdateGroup] {
        &self.groups
    }

    /// Number of scheduled groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Always false for a bucket obtained from a scheduler.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Take ownership of the groups.
    pub fn into_groups(self) -> Vec<UpdateGroup> {
        self.groups
    }

    /// Split into `(time, groups)`.
    pub fn into_parts(self) -> (T, Vec<UpdateGroup>) {
        (self.time, self.groups)
    }
}

/// Whether an insert opened a new bucket or extended an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Placement {
    Created,
    Merged,
}

/// Arena-backed map from logical time to bucket with O(log n) extract-min.
pub(crate) struct BucketStore<T> {
    slots: Vec<Option<Bucket<T>>>,
    free_list: Vec<usize>,
    index: IndexMap<T, usize>,
    heap: BinaryHeap<Reverse<T>>,
    pending_groups: usize,
}

impl<T: LogicalTime> BucketStore<T> {
    pub(crate) fn with_capacity(buckets: usize) -> Self {
        Self {
            slots: Vec::with_capacity(buckets),
            free_list: Vec::new(),
            index: IndexMap::with_capacity(buckets),
            heap: BinaryHeap::with_capacity(buckets),
            pending_groups: 0,
        }
    }

    /// Append `groups` to the bucket for `time`, creating it if absent.
    ///
    /// Callers must not pass an empty `groups`: a bucket with no groups
    /// would count towards `len()` without any pending work.
    pub(crate) fn insert(&mut self, time: T, groups: Vec<UpdateGroup>) -> Placement {
        debug_assert!(!groups.is_empty(), "empty insert reached the store");
        self.pending_groups += groups.len();

        let existing = self
            .index
            .get(&time)
            .and_then(|&slot| self.slots[slot].as_mut());
        if let Some(bucket) = existing {
            bucket.groups.extend(groups);
            return Placement::Merged;
        }

        let bucket = Bucket { time, groups };
        let slot = if let Some(reuse) = self.free_list.pop() {
            self.slots[reuse] = Some(bucket);
            reuse
        } else {
            self.slots.push(Some(bucket));
            self.slots.len() - 1
        };
        self.index.insert(time, slot);
        self.heap.push(Reverse(time));
        Placement::Created
    }

    /// Remove and return the bucket with the smallest time.
    pub(crate) fn pop_min(&mut self) -> Option<Bucket<T>> {
        let Reverse(time) = self.heap.pop()?;
        let slot = self.index.swap_remove(&time)?;
        let bucket = self.slots[slot].take()?;
        self.free_list.push(slot);
        self.pending_groups -= bucket.groups.len();
        Some(bucket)
    }

    /// Smallest live time, without removing it.
    pub(crate) fn peek_min(&self) -> Option<T> {
        self.heap.peek().map(|Reverse(time)| *time)
    }

    /// Bucket for `time`, if one is live.
    pub(crate) fn get(&self, time: &T) -> Option<&Bucket<T>> {
        let &slot = self.index.get(time)?;
        self.slots[slot].as_ref()
    }

    /// Every live bucket, in no particular order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Bucket<T>> {
        self.slots.iter().flatten()
    }

    /// Number of live buckets (distinct pending times).
    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Total groups across every live bucket.
    pub(crate) fn pending_groups(&self) -> usize {
        self.pending_groups
    }

    /// Slots ever allocated, live or free.
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Drop every bucket and reset the indices together.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.index.clear();
        self.heap.clear();
        self.pending_groups = 0;
    }
}
