//! Benchmark profiles for the propsched scheduler.
//!
//! Provides pre-built workloads for benchmarking:
//!
//! - [`million_insert_profile`]: 1M single-group inserts over 1000 times
//! - [`merge_heavy_profile`]: many inserts over very few times
//! - [`spread_profile`]: one insert per time, no merging
//! - [`fill`]: load a profile into a fresh scheduler

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use propsched::{Scheduler, SchedulerConfig, Time};
use propsched_test_utils::{RepeatingWorkload, TimeOrder};

/// 1,000,000 inserts cycling through 1000 distinct times.
pub fn million_insert_profile(seed: u64) -> RepeatingWorkload {
    RepeatingWorkload::new(1_000_000, 1000).with_seed(seed)
}

/// 100,000 inserts at random over 16 distinct times.
pub fn merge_heavy_profile(seed: u64) -> RepeatingWorkload {
    RepeatingWorkload::new(100_000, 16)
        .with_order(TimeOrder::Random)
        .with_seed(seed)
}

/// 100,000 inserts, each at its own time.
pub fn spread_profile(seed: u64) -> RepeatingWorkload {
    RepeatingWorkload::new(100_000, 100_000).with_seed(seed)
}

/// Insert every update of `workload` into a new scheduler, one call each.
pub fn fill(workload: &RepeatingWorkload) -> Scheduler<Time> {
    let config = SchedulerConfig::new().with_initial_buckets(workload.distinct_times as usize);
    let mut sched = Scheduler::with_config(config);
    for (time, group) in workload.iter() {
        // Workload groups always have `group_len >= 1` steps.
        if sched.insert(time, [group]).is_err() {
            break;
        }
    }
    sched
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spread_profile_has_no_merges() {
        let w = RepeatingWorkload::new(500, 500);
        let sched = fill(&w);
        assert_eq!(sched.size(), 500);
        assert_eq!(sched.metrics().buckets_merged, 0);
    }

    #[test]
    fn merge_heavy_profile_stays_small() {
        let sched = fill(&merge_heavy_profile(1));
        assert!(sched.size() <= 16);
        assert_eq!(sched.pending_groups(), 100_000);
    }
}
