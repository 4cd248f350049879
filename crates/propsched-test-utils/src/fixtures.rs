//! Fixture helpers shared by integration tests and benches.

use propsched::{LogicalTime, Scheduler, Time, UpdateGroup};

/// Build a [`Time`] from a literal.
///
/// # Panics
///
/// Panics on NaN; fixtures are expected to use valid times.
pub fn time(v: f64) -> Time {
    Time::new(v).expect("fixture time must not be NaN")
}

/// Build an [`UpdateGroup`] from raw identifiers.
pub fn group(raw: &[usize]) -> UpdateGroup {
    UpdateGroup::from(raw)
}

/// Drain `sched` and return the bucket times in the order they fired.
pub fn bucket_times<T: LogicalTime>(sched: &mut Scheduler<T>) -> Vec<T> {
    sched.drain().map(|b| b.time()).collect()
}

/// Drain `sched` into `(time, raw groups)` pairs for easy comparison.
pub fn drain_raw<T: LogicalTime>(sched: &mut Scheduler<T>) -> Vec<(T, Vec<Vec<usize>>)> {
    sched
        .drain()
        .map(|b| {
            let (t, groups) = b.into_parts();
            (t, groups.iter().map(UpdateGroup::to_raw).collect())
        })
        .collect()
}
