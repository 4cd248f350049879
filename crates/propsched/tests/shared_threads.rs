//! Producers and a consumer sharing one scheduler across threads.

use std::thread;

use propsched::SharedScheduler;

#[test]
fn producers_and_consumer_lose_nothing() {
    const PRODUCERS: usize = 4;
    const PER_PRODUCER: usize = 2_500;

    let shared: SharedScheduler<u64> = SharedScheduler::new();
    let producers: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let shared = shared.clone();
            thread::spawn(move || {
                for i in 0..PER_PRODUCER {
                    shared.insert((i % 100) as u64, [[p, i]]).unwrap();
                }
            })
        })
        .collect();

    let consumer = {
        let shared = shared.clone();
        thread::spawn(move || {
            let mut seen = 0;
            while seen < PRODUCERS * PER_PRODUCER {
                match shared.remove_min().unwrap() {
                    Some(bucket) => seen += bucket.len(),
                    None => thread::yield_now(),
                }
            }
            seen
        })
    };

    for p in producers {
        p.join().unwrap();
    }
    assert_eq!(consumer.join().unwrap(), PRODUCERS * PER_PRODUCER);
    assert_eq!(shared.size().unwrap(), 0);
    assert!(shared.active().unwrap().is_empty());

    let m = shared.metrics().unwrap();
    assert_eq!(m.groups_inserted, (PRODUCERS * PER_PRODUCER) as u64);
    assert_eq!(m.groups_removed, m.groups_inserted);
}
