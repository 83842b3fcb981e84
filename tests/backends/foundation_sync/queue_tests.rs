//! Integration tests for `BlockingQueue` under real thread contention.

use foundation_sync::queue::{BlockingQueue, TryPutError};
use foundation_testing::stress::sync::run_queue_stress;
use foundation_testing::stress::StressConfig;
use ntest::timeout;
use serial_test::serial;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;
use tracing_test::traced_test;

#[test]
#[timeout(5000)]
fn test_fifo_single_producer() {
    let queue = Arc::new(BlockingQueue::new());

    let producer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || {
            for i in 0..1_000u32 {
                queue.put(i);
            }
        })
    };
    producer.join().unwrap();

    let taken: Vec<u32> = (0..1_000).map(|_| queue.take()).collect();
    assert_eq!(taken, (0..1_000).collect::<Vec<_>>());
}

#[test]
#[timeout(5000)]
fn test_scenario_capacity_one_handoff() {
    let queue = Arc::new(BlockingQueue::bounded(1));
    let (put_done_tx, put_done_rx) = mpsc::channel();

    let producer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || {
            queue.put(5);
            put_done_tx.send(5).unwrap();
            queue.put(7);
            put_done_tx.send(7).unwrap();
        })
    };

    assert_eq!(put_done_rx.recv().unwrap(), 5);
    // The second put has nowhere to go until we take
    assert!(put_done_rx.recv_timeout(Duration::from_millis(100)).is_err());
    assert!(queue.is_full());

    assert_eq!(queue.take(), 5);
    assert_eq!(put_done_rx.recv().unwrap(), 7);
    assert_eq!(queue.take(), 7);
    producer.join().unwrap();
}

#[test]
#[timeout(10000)]
fn test_bounded_size_never_exceeds_capacity() {
    const CAPACITY: usize = 4;
    let queue = Arc::new(BlockingQueue::bounded(CAPACITY));
    let finished = Arc::new(AtomicBool::new(false));
    let violations = Arc::new(AtomicUsize::new(0));

    let sampler = {
        let (queue, finished, violations) =
            (Arc::clone(&queue), Arc::clone(&finished), Arc::clone(&violations));
        thread::spawn(move || {
            while !finished.load(Ordering::Acquire) {
                if queue.size() > CAPACITY {
                    violations.fetch_add(1, Ordering::Relaxed);
                }
            }
        })
    };

    let producers: Vec<_> = (0..3)
        .map(|p| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for i in 0..300 {
                    queue.put(p * 1000 + i);
                }
            })
        })
        .collect();

    for _ in 0..900 {
        let _ = queue.take();
    }
    for producer in producers {
        producer.join().unwrap();
    }

    finished.store(true, Ordering::Release);
    sampler.join().unwrap();

    assert_eq!(violations.load(Ordering::Relaxed), 0);
    assert!(queue.is_empty());
}

#[test]
#[timeout(10000)]
fn test_multiple_consumers_no_double_consumption() {
    let queue = Arc::new(BlockingQueue::bounded(8));
    let num_consumers = 4;
    let per_consumer = 250;
    let total = num_consumers * per_consumer;

    let consumers: Vec<_> = (0..num_consumers)
        .map(|_| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || (0..per_consumer).map(|_| queue.take()).collect::<Vec<usize>>())
        })
        .collect();

    for item in 0..total {
        queue.put(item);
    }

    let mut seen = HashSet::new();
    for consumer in consumers {
        for item in consumer.join().unwrap() {
            assert!(seen.insert(item), "item {item} taken twice");
        }
    }
    assert_eq!(seen.len(), total);
}

#[test]
#[timeout(5000)]
fn test_try_put_returns_ownership() {
    let queue = BlockingQueue::bounded(1);
    queue.put(String::from("first"));

    match queue.try_put(String::from("second")) {
        Err(TryPutError::Full(rejected)) => assert_eq!(rejected, "second"),
        Ok(()) => panic!("a full queue accepted an element"),
    }
    assert_eq!(queue.take(), "first");
}

#[test]
#[traced_test]
fn test_drain_logs_producer_wakeup() {
    let queue = BlockingQueue::bounded(2);
    queue.put(1);
    queue.put(2);
    assert_eq!(queue.drain(), vec![1, 2]);
    assert!(logs_contain("queue drained"));
}

#[test]
#[serial]
#[timeout(60000)]
fn test_queue_stress_unbounded() {
    let report = run_queue_stress(StressConfig::new().threads(8).iterations(2_000));
    assert!(report.is_clean(), "{:?}", report.delivery);
    assert_eq!(report.consumed, 16_000);
}

#[test]
#[serial]
#[timeout(60000)]
fn test_queue_stress_bounded_backpressure() {
    let report = run_queue_stress(StressConfig::new().threads(8).iterations(2_000).capacity(2));
    assert!(report.is_clean(), "{:?}", report.delivery);
    assert!(report.max_observed_len <= 2);
}
