//! Logical time keys.
//!
//! Any `Copy + Ord + Hash` type can key the scheduler through the
//! [`LogicalTime`] blanket implementation, so integer ticks work out of
//! the box. Floating-point producers wrap their values in [`Time`], which
//! restores the total order and hash/equality agreement that raw `f64`
//! lacks.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::TimeError;

/// A totally ordered scheduling key.
///
/// Two keys that compare equal always share one bucket; two keys that
/// compare unequal never do. `Hash` must agree with `Eq`.
pub trait LogicalTime: Copy + Ord + Hash + fmt::Debug {}

impl<T: Copy + Ord + Hash + fmt::Debug> LogicalTime for T {}

/// A floating-point logical time.
///
/// Construction rejects NaN and folds `-0.0` into `+0.0`, so equality is
/// exactly IEEE-754 equality over the remaining values and every pair of
/// equal times hashes identically. Infinities are accepted and sort at
/// the extremes.
#[derive(Clone, Copy, Debug)]
pub struct Time(f64);

impl Time {
    /// Time zero.
    pub const ZERO: Time = Time(0.0);

    /// Wrap `value` as a logical time.
    pub fn new(value: f64) -> Result<Self, TimeError> {
        if value.is_nan() {
            return Err(TimeError::NotANumber);
        }
        // `-0.0 + 0.0 == +0.0`; every other value passes through unchanged.
        Ok(Self(value + 0.0))
    }

    /// The wrapped value.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for Time {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Time {}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Time {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Time {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Time {
    type Error = TimeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<u32> for Time {
    fn from(v: u32) -> Self {
        Self(f64::from(v))
    }
}

impl From<i32> for Time {
    fn from(v: i32) -> Self {
        // `f64::from(0i32)` is `+0.0`, so no normalisation is needed.
        Self(f64::from(v))
    }
}

impl From<Time> for f64 {
    fn from(t: Time) -> Self {
        t.0
    }
}
