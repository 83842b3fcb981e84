//! Integration tests for the lock capability and conditions.

use foundation_sync::primitives::{Condition, Monitor, MutexLock, RawLock, SpinLock};
use foundation_testing::stress::{StressConfig, StressHarness};
use ntest::timeout;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

struct Guarded<L> {
    lock: L,
    in_section: AtomicUsize,
}

fn exclusion_holds<L: RawLock + Send + Sync + 'static>(lock: L) -> bool {
    let guarded = Arc::new(Guarded {
        lock,
        in_section: AtomicUsize::new(0),
    });

    let harness = StressHarness::new(StressConfig::new().threads(4).iterations(500));
    let result = harness.run(move |_thread_id, _iteration| {
        let _held = guarded.lock.scoped();
        let inside = guarded.in_section.fetch_add(1, Ordering::SeqCst);
        thread::yield_now();
        guarded.in_section.fetch_sub(1, Ordering::SeqCst);
        inside == 0
    });

    result.failures == 0 && result.successes == 2000
}

#[test]
#[timeout(30000)]
fn test_mutex_lock_mutual_exclusion() {
    assert!(exclusion_holds(MutexLock::new()));
}

#[test]
#[timeout(30000)]
fn test_spin_lock_mutual_exclusion() {
    assert!(exclusion_holds(SpinLock::new()));
}

#[test]
#[timeout(10000)]
fn test_condition_ping_pong() {
    const ROUNDS: usize = 200;

    let turn = Arc::new(Monitor::new(0usize));
    let changed = Arc::new(turn.condition());

    let players: Vec<_> = (0..2)
        .map(|me| {
            let (turn, changed) = (Arc::clone(&turn), Arc::clone(&changed));
            thread::spawn(move || {
                for _ in 0..ROUNDS {
                    let mut current = turn.enter();
                    while *current % 2 != me {
                        current.wait(&changed);
                    }
                    *current += 1;
                    changed.notify_all();
                }
            })
        })
        .collect();

    for player in players {
        player.join().unwrap();
    }
    assert_eq!(*turn.enter(), ROUNDS * 2);
}

#[test]
#[timeout(5000)]
fn test_condition_rejects_wait_without_ownership_from_other_lock() {
    let bound = Arc::new(MutexLock::new());
    let condition = Arc::new(Condition::new(Arc::clone(&bound)));
    let stranger = MutexLock::new();

    let outcome = thread::scope(|scope| {
        scope
            .spawn(|| {
                let mut held = stranger.scoped();
                condition.wait(&mut held);
            })
            .join()
    });

    assert!(outcome.is_err());
    assert!(!bound.is_locked());
    assert!(!stranger.is_locked());
}
