//! Integration tests for `CountDownLatch`.

use foundation_sync::primitives::CountDownLatch;
use foundation_testing::stress::sync::run_latch_stress;
use foundation_testing::stress::StressConfig;
use ntest::timeout;
use serial_test::serial;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

#[test]
#[timeout(5000)]
fn test_scenario_waiter_released_after_all_count_downs() {
    let latch = Arc::new(CountDownLatch::new(3));
    let completed = Arc::new(AtomicUsize::new(0));
    let (released_tx, released_rx) = mpsc::channel();

    let waiter = {
        let (latch, completed) = (Arc::clone(&latch), Arc::clone(&completed));
        thread::spawn(move || {
            latch.wait();
            released_tx.send(completed.load(Ordering::SeqCst)).unwrap();
        })
    };

    let (go_tx, go_rx) = mpsc::channel::<()>();
    let go_rx = Arc::new(std::sync::Mutex::new(go_rx));
    let workers: Vec<_> = (0..3)
        .map(|_| {
            let (latch, completed, go_rx) =
                (Arc::clone(&latch), Arc::clone(&completed), Arc::clone(&go_rx));
            thread::spawn(move || {
                go_rx.lock().unwrap().recv().unwrap();
                completed.fetch_add(1, Ordering::SeqCst);
                latch.count_down();
            })
        })
        .collect();

    for round in 1..=3 {
        go_tx.send(()).unwrap();
        if round < 3 {
            while completed.load(Ordering::SeqCst) < round {
                thread::yield_now();
            }
            assert!(released_rx.recv_timeout(Duration::from_millis(50)).is_err());
        }
    }

    assert_eq!(released_rx.recv().unwrap(), 3);
    waiter.join().unwrap();
    for worker in workers {
        worker.join().unwrap();
    }
}

#[test]
#[timeout(5000)]
fn test_count_is_monotonic_and_saturates() {
    let latch = Arc::new(CountDownLatch::new(5));

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let latch = Arc::clone(&latch);
            thread::spawn(move || latch.count_down())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(latch.count(), 0);
    latch.count_down();
    assert_eq!(latch.count(), 0);
    latch.wait();
}

#[test]
#[timeout(5000)]
fn test_many_waiters_released_together() {
    let latch = Arc::new(CountDownLatch::new(1));
    let waiters: Vec<_> = (0..8)
        .map(|_| {
            let latch = Arc::clone(&latch);
            thread::spawn(move || latch.wait())
        })
        .collect();

    thread::sleep(Duration::from_millis(20));
    latch.count_down();

    for waiter in waiters {
        waiter.join().unwrap();
    }
}

#[test]
#[serial]
#[timeout(60000)]
fn test_latch_stress() {
    let result = run_latch_stress(StressConfig::new().threads(8).iterations(200));
    assert_eq!(result.failures, 0);
    assert_eq!(result.successes, 200);
}
