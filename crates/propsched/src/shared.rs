//! A lock-guarded scheduler for several producers and consumers.
//!
//! `insert` and `remove_min` both touch the time index, the heap and the
//! active counts, so the whole [`Scheduler`] sits behind one exclusive
//! lock. Use [`SharedScheduler::with_lock`] when a sequence of calls has
//! to observe a consistent state (e.g. peek then pop).

use std::error::Error;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::SchedulerConfig;
use crate::error::ScheduleError;
use crate::group::{NodeId, UpdateGroup};
use crate::metrics::SchedulerMetrics;
use crate::scheduler::Scheduler;
use crate::store::Bucket;
use crate::time::{LogicalTime, Time};

/// Cloneable handle to a [`Scheduler`] behind a mutex.
///
/// Every clone refers to the same scheduler. Every method takes the lock
/// for its whole duration and returns [`ScheduleError::LockPoisoned`] if
/// a previous holder panicked.
pub struct SharedScheduler<T = Time> {
    inner: Arc<Mutex<Scheduler<T>>>,
}

// Compile-time assertion: SharedScheduler must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<SharedScheduler<Time>>();
    assert::<SharedScheduler<u64>>();
};

impl<T: LogicalTime> SharedScheduler<T> {
    /// Wrap an empty scheduler with the default configuration.
    pub fn new() -> Self {
        Self::from_scheduler(Scheduler::new())
    }

    /// Wrap an empty scheduler with the given configuration.
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self::from_scheduler(Scheduler::with_config(config))
    }

    /// Wrap an existing scheduler, keeping its pending work.
    pub fn from_scheduler(scheduler: Scheduler<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(scheduler)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Scheduler<T>>, ScheduleError> {
        self.inner.lock().map_err(|_| ScheduleError::LockPoisoned)
    }

    /// Run `f` with exclusive access to the scheduler.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut Scheduler<T>) -> R) -> Result<R, ScheduleError> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }

    /// See [`Scheduler::insert`].
    pub fn insert<G>(&self, time: T, groups: G) -> Result<(), ScheduleError>
    where
        G: IntoIterator,
        G::Item: Into<UpdateGroup>,
    {
        self.lock()?.insert(time, groups)
    }

    /// See [`Scheduler::insert_all`].
    pub fn insert_all<I, G>(&self, entries: I) -> Result<(), ScheduleError>
    where
        I: IntoIterator<Item = (T, G)>,
        G: IntoIterator,
        G::Item: Into<UpdateGroup>,
    {
        self.lock()?.insert_all(entries)
    }

    /// See [`Scheduler::remove_min`].
    pub fn remove_min(&self) -> Result<Option<Bucket<T>>, ScheduleError> {
        Ok(self.lock()?.remove_min())
    }

    /// See [`Scheduler::size`].
    pub fn size(&self) -> Result<usize, ScheduleError> {
        Ok(self.lock()?.size())
    }

    /// See [`Scheduler::is_empty`].
    pub fn is_empty(&self) -> Result<bool, ScheduleError> {
        Ok(self.lock()?.is_empty())
    }

    /// See [`Scheduler::peek_time`].
    pub fn peek_time(&self) -> Result<Option<T>, ScheduleError> {
        Ok(self.lock()?.peek_time())
    }

    /// See [`Scheduler::active`].
    pub fn active(&self) -> Result<Vec<NodeId>, ScheduleError> {
        Ok(self.lock()?.active())
    }

    /// See [`Scheduler::pending_groups`].
    pub fn pending_groups(&self) -> Result<usize, ScheduleError> {
        Ok(self.lock()?.pending_groups())
    }

    /// See [`Scheduler::is_active`].
    pub fn is_active(&self, id: NodeId) -> Result<bool, ScheduleError> {
        Ok(self.lock()?.is_active(id))
    }

    /// See [`Scheduler::active_count`].
    pub fn active_count(&self) -> Result<usize, ScheduleError> {
        Ok(self.lock()?.active_count())
    }

    /// See [`Scheduler::pending_for`].
    pub fn pending_for(&self, id: NodeId) -> Result<usize, ScheduleError> {
        Ok(self.lock()?.pending_for(id))
    }

    /// See [`Scheduler::clear`].
    pub fn clear(&self) -> Result<(), ScheduleError> {
        self.lock()?.clear();
        Ok(())
    }

    /// A copy of the scheduler's configuration.
    pub fn config(&self) -> Result<SchedulerConfig, ScheduleError> {
        Ok(self.lock()?.config().clone())
    }

    /// See [`Scheduler::metrics`].
    pub fn metrics(&self) -> Result<SchedulerMetrics, ScheduleError> {
        Ok(self.lock()?.metrics())
    }

    /// Unwrap the scheduler if this is the last handle.
    ///
    /// Fails with [`TryUnwrapError::Shared`] (handing `self` back) while
    /// other clones are alive, and with [`TryUnwrapError::Poisoned`] if a
    /// holder panicked, since the scheduler may be half-updated.
    pub fn try_unwrap(self) -> Result<Scheduler<T>, TryUnwrapError<T>> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => mutex.into_inner().map_err(|_| TryUnwrapError::Poisoned),
            Err(inner) => Err(TryUnwrapError::Shared(Self { inner })),
        }
    }
}

/// Why [`SharedScheduler::try_unwrap`] could not return the scheduler.
pub enum TryUnwrapError<T> {
    /// Other handles are still alive. Carries the handle back.
    Shared(SharedScheduler<T>),
    /// A lock holder panicked.
    Poisoned,
}

impl<T> fmt::Debug for TryUnwrapError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shared(_) => f.write_str("Shared(..)"),
            Self::Poisoned => f.write_str("Poisoned"),
        }
    }
}

impl<T> fmt::Display for TryUnwrapError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shared(_) => write!(f, "scheduler is still shared by other handles"),
            Self::Poisoned => write!(f, "scheduler lock poisoned by a panicking holder"),
        }
    }
}

impl<T> Error for TryUnwrapError<T> {}

impl<T> Clone for SharedScheduler<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: LogicalTime> Default for SharedScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
