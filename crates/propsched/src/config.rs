//! Scheduler configuration.

/// What to do with an update group that has no steps.
///
/// An empty group has no active identifier, so the scheduler cannot
/// attribute it to any thread. The choice is left to the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyGroupPolicy {
    /// Refuse the whole `insert`/`insert_all` call with
    /// [`ScheduleError::EmptyGroup`](crate::ScheduleError::EmptyGroup).
    #[default]
    Reject,
    /// Store the group like any other. It fires with its bucket but
    /// contributes nothing to the active set.
    Keep,
}

/// Configuration for a [`Scheduler`](crate::Scheduler).
///
/// Plain data; read once at construction and exposed unchanged through
/// [`Scheduler::config`](crate::Scheduler::config).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Handling of zero-length update groups. Default: `Reject`.
    pub empty_groups: EmptyGroupPolicy,

    /// Number of buckets to reserve space for up front.
    ///
    /// Only a capacity hint for the slab, time index and heap; the
    /// scheduler grows past it freely. Default: 64.
    pub initial_buckets: usize,
}

impl SchedulerConfig {
    /// Default bucket capacity hint.
    pub const DEFAULT_INITIAL_BUCKETS: usize = 64;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            empty_groups: EmptyGroupPolicy::default(),
            initial_buckets: Self::DEFAULT_INITIAL_BUCKETS,
        }
    }

    /// Replace the empty-group policy.
    pub fn with_empty_groups(mut self, policy: EmptyGroupPolicy) -> Self {
        self.empty_groups = policy;
        self
    }

    /// Replace the bucket capacity hint.
    pub fn with_initial_buckets(mut self, buckets: usize) -> Self {
        self.initial_buckets = buckets;
        self
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}
