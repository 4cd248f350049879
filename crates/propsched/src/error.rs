//! Error types for the scheduler.
//!
//! Split by concern: [`TimeError`] for constructing floating-point
//! logical times, [`ScheduleError`] for insertion and shared access.
//! Removing from an empty scheduler is not an error; it returns `None`.

use std::error::Error;
use std::fmt;

/// Errors from constructing a [`Time`](crate::Time).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeError {
    /// The value was NaN, which has no position in a total order.
    NotANumber,
}

impl fmt::Display for TimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber => write!(f, "logical time must not be NaN"),
        }
    }
}

impl Error for TimeError {}

/// Errors from scheduling operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduleError {
    /// A zero-length update group was offered while the scheduler is
    /// configured with [`EmptyGroupPolicy::Reject`](crate::EmptyGroupPolicy::Reject).
    ///
    /// Nothing from the offending call was scheduled.
    EmptyGroup {
        /// Index of the `(time, groups)` pair within the batch.
        /// Always 0 for a single `insert`.
        entry: usize,
        /// Index of the empty group within that pair's groups.
        group: usize,
    },
    /// The lock guarding a [`SharedScheduler`](crate::SharedScheduler)
    /// was poisoned by a panic in another holder.
    LockPoisoned,
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGroup { entry, group } => {
                write!(
                    f,
                    "update group {group} of entry {entry} is empty and has no active identifier"
                )
            }
            Self::LockPoisoned => write!(f, "scheduler lock poisoned"),
        }
    }
}

impl Error for ScheduleError {}
