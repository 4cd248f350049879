//! Reference-counted index of active identifiers.
//!
//! Each scheduled group with a non-empty path contributes one count to
//! its last step. An identifier is active while its count is non-zero.
//! Mutations and per-id lookups are O(1) amortised, and no query rescans
//! the buckets. The full listing is O(k log k) in the k distinct ids,
//! because the map keeps insertion order and is sorted on demand.

use indexmap::IndexMap;

use crate::group::{NodeId, UpdateGroup};

/// Multiset of active identifiers over every pending group.
#[derive(Debug, Default)]
pub(crate) struct ActiveIndex {
    counts: IndexMap<NodeId, usize>,
}

impl ActiveIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Count `group`'s active identifier, if it has one.
    pub(crate) fn add(&mut self, group: &UpdateGroup) {
        if let Some(id) = group.active() {
            *self.counts.entry(id).or_insert(0) += 1;
        }
    }

    /// Release `group`'s active identifier, if it has one.
    pub(crate) fn remove(&mut self, group: &UpdateGroup) {
        let Some(id) = group.active() else {
            return;
        };
        match self.counts.get_mut(&id) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                self.counts.swap_remove(&id);
            }
            None => debug_assert!(false, "released untracked active id {id}"),
        }
    }

    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.counts.contains_key(&id)
    }

    /// Number of groups currently pointing at `id`.
    pub(crate) fn count(&self, id: NodeId) -> usize {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    /// Distinct active identifiers, ascending. Sorts a fresh copy each call.
    pub(crate) fn sorted(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.counts.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub(crate) fn len(&self) -> usize {
        self.counts.len()
    }

    pub(crate) fn clear(&mut self) {
        self.counts.clear();
    }
}
