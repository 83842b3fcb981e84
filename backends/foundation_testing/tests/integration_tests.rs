//! Multi-threaded scenarios combining queues, latches and the thread pool.

use foundation_sync::primitives::CountDownLatch;
use foundation_sync::queue::BlockingQueue;
use foundation_testing::scenarios::ThreadPool;
use foundation_testing::stress::{StressConfig, StressHarness};
use ntest::timeout;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[test]
#[timeout(10000)]
fn test_multiple_producers_single_consumer() {
    let queue = Arc::new(BlockingQueue::bounded(16));
    let num_producers = 5;
    let items_per_producer = 20;
    let total_items = num_producers * items_per_producer;

    let handles: Vec<_> = (0..num_producers)
        .map(|producer_id| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for i in 0..items_per_producer {
                    queue.put(producer_id * 1000 + i);
                }
            })
        })
        .collect();

    let mut received: Vec<usize> = (0..total_items).map(|_| queue.take()).collect();
    for handle in handles {
        handle.join().unwrap();
    }

    received.sort_unstable();
    received.dedup();
    assert_eq!(received.len(), total_items);
}

#[test]
#[timeout(10000)]
fn test_thread_pool_concurrent_execution() {
    let pool = ThreadPool::new(4, 8);
    let counter = Arc::new(AtomicUsize::new(0));
    let num_jobs = 100;

    for _ in 0..num_jobs {
        let counter = Arc::clone(&counter);
        pool.execute(move || {
            counter.fetch_add(1, Ordering::Relaxed);
            thread::sleep(Duration::from_millis(1));
        });
    }

    // Dropping the pool drains the queue and joins every worker
    drop(pool);

    assert_eq!(counter.load(Ordering::Relaxed), num_jobs);
}

#[test]
#[timeout(10000)]
fn test_thread_pool_signals_latch() {
    let pool = ThreadPool::new(2, 4);
    let done = Arc::new(CountDownLatch::new(10));
    let results = Arc::new(Mutex::new(Vec::new()));

    for i in 0..10 {
        let (done, results) = (Arc::clone(&done), Arc::clone(&results));
        pool.execute(move || {
            results.lock().unwrap().push(i);
            done.count_down();
        });
    }

    done.wait();
    let mut results = results.lock().unwrap().clone();
    results.sort_unstable();
    assert_eq!(results, (0..10).collect::<Vec<_>>());
}

#[test]
#[timeout(10000)]
fn test_stress_with_duration_limit() {
    let config = StressConfig::new()
        .threads(4)
        .iterations(1_000_000)
        .duration(Duration::from_millis(300));

    let result = StressHarness::new(config).run(|_thread_id, _iteration| {
        thread::sleep(Duration::from_micros(10));
        true
    });

    assert!(result.duration.as_secs() <= 2);
    assert!(result.total_operations() < 4_000_000);
}

#[test]
#[timeout(10000)]
fn test_high_contention_capacity_one() {
    let queue = Arc::new(BlockingQueue::bounded(1));
    let num_threads = 10;
    let items_per_thread = 20;

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for i in 0..items_per_thread {
                    queue.put(thread_id * 1000 + i);
                    let _ = queue.take();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(queue.is_empty());
}
