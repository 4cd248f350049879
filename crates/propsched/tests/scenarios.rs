//! End-to-end scheduling scenarios: ordering, coalescing, active-set
//! queries and empty-scheduler behaviour.

use propsched::{EmptyGroupPolicy, NodeId, ScheduleError, Scheduler, SchedulerConfig};
use propsched_test_utils::{bucket_times, drain_raw, group, time};

#[test]
fn fresh_scheduler_has_no_buckets() {
    let sched: Scheduler = Scheduler::new();
    assert_eq!(sched.size(), 0);
}

#[test]
fn batch_fires_in_time_order() {
    let mut sched = Scheduler::new();
    sched
        .insert_all(vec![
            (time(3.0), vec![group(&[7, 8, 9])]),
            (time(1.0), vec![group(&[1, 2, 3])]),
            (time(2.0), vec![group(&[4, 5, 6])]),
        ])
        .unwrap();
    assert_eq!(sched.size(), 3);
    assert_eq!(
        bucket_times(&mut sched),
        vec![time(1.0), time(2.0), time(3.0)]
    );
}

#[test]
fn active_collects_last_steps() {
    let mut sched = Scheduler::new();
    sched
        .insert(time(1.0), [group(&[1, 2, 3]), group(&[4, 5, 6])])
        .unwrap();
    sched.insert(time(2.0), [group(&[7, 8, 9])]).unwrap();
    assert_eq!(sched.active(), vec![NodeId(3), NodeId(6), NodeId(9)]);
}

#[test]
fn batch_with_repeated_time_merges() {
    // Same data as above, delivered as one batch with a repeated time.
    let mut sched = Scheduler::new();
    sched
        .insert_all(vec![
            (time(1.0), vec![group(&[1, 2, 3])]),
            (time(1.0), vec![group(&[4, 5, 6])]),
            (time(2.0), vec![group(&[7, 8, 9])]),
        ])
        .unwrap();
    assert_eq!(sched.size(), 2);
    assert_eq!(sched.active(), vec![NodeId(3), NodeId(6), NodeId(9)]);
}

#[test]
fn repeated_time_coalesces_in_insertion_order() {
    let mut sched = Scheduler::new();
    sched.insert(time(1.0), [group(&[1, 2, 3])]).unwrap();
    sched.insert(time(1.0), [group(&[4, 5, 6])]).unwrap();
    assert_eq!(sched.size(), 1);
    assert_eq!(
        drain_raw(&mut sched),
        vec![(time(1.0), vec![vec![1, 2, 3], vec![4, 5, 6]])]
    );
}

#[test]
fn merge_across_batch_and_single_inserts() {
    let mut sched = Scheduler::new();
    sched.insert(time(4.0), [group(&[1])]).unwrap();
    sched
        .insert_all(vec![
            (time(4.0), vec![group(&[2])]),
            (time(0.5), vec![group(&[3])]),
        ])
        .unwrap();
    sched.insert(time(4.0), [group(&[4])]).unwrap();
    assert_eq!(
        drain_raw(&mut sched),
        vec![
            (time(0.5), vec![vec![3]]),
            (time(4.0), vec![vec![1], vec![2], vec![4]]),
        ]
    );
}

#[test]
fn identical_groups_are_not_deduplicated() {
    let mut sched = Scheduler::new();
    sched.insert(time(1.0), [group(&[1, 2])]).unwrap();
    sched.insert(time(1.0), [group(&[1, 2])]).unwrap();
    assert_eq!(sched.pending_groups(), 2);
    assert_eq!(sched.pending_for(NodeId(2)), 2);
    assert_eq!(sched.remove_min().unwrap().len(), 2);
}

#[test]
fn remove_on_empty_signals_absence() {
    let mut sched: Scheduler = Scheduler::new();
    assert!(sched.remove_min().is_none());

    sched.insert(time(1.0), [group(&[1])]).unwrap();
    assert!(sched.remove_min().is_some());
    assert!(sched.remove_min().is_none());
    assert_eq!(sched.size(), 0);
}

#[test]
fn consumer_loop_sees_work_scheduled_while_running() {
    // A consumer that schedules follow-up work at later times, the way a
    // propagator engine does after each round.
    let mut sched: Scheduler<u32> = Scheduler::new();
    sched.insert(0, [[0usize]]).unwrap();

    let mut fired = Vec::new();
    while let Some(bucket) = sched.remove_min() {
        let now = bucket.time();
        fired.push(now);
        if now < 5 {
            sched.insert(now + 2, [[now as usize, now as usize + 2]]).unwrap();
            sched.insert(now + 1, [[now as usize, now as usize + 1]]).unwrap();
        }
    }
    assert_eq!(fired, vec![0, 1, 2, 3, 4, 5, 6]);
}

#[test]
fn empty_group_policy_is_configurable() {
    let mut strict: Scheduler = Scheduler::new();
    assert_eq!(
        strict.insert(time(1.0), [group(&[])]),
        Err(ScheduleError::EmptyGroup { entry: 0, group: 0 })
    );
    assert_eq!(strict.size(), 0);

    let mut lenient =
        Scheduler::with_config(SchedulerConfig::new().with_empty_groups(EmptyGroupPolicy::Keep));
    lenient.insert(time(1.0), [group(&[])]).unwrap();
    assert_eq!(lenient.size(), 1);
    assert!(lenient.active().is_empty());
    assert_eq!(lenient.remove_min().unwrap().len(), 1);
}
