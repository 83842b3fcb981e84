//! `CountDownLatch` stress runs.

use std::thread;
use std::time::Instant;

use foundation_sync::primitives::CountDownLatch;

use crate::stress::{StressConfig, StressResult};

/// Repeatedly opens a fresh latch from `thread_count` racing threads.
///
/// Every round each thread counts down twice, so half of the calls land on
/// an already open latch, while one extra thread waits for it to open. A
/// round succeeds when the waiter returned and the count ended at exactly 0.
///
/// # Examples
///
/// ```
/// use foundation_testing::stress::{StressConfig, sync::run_latch_stress};
///
/// let result = run_latch_stress(StressConfig::new().threads(4).iterations(50));
/// assert_eq!(result.successes, 50);
/// assert_eq!(result.failures, 0);
/// ```
#[must_use]
pub fn run_latch_stress(config: StressConfig) -> StressResult {
    let threads = config.get_thread_count();
    let rounds = config.get_iterations();
    let start = Instant::now();

    let mut successes = 0;
    for _ in 0..rounds {
        let latch = CountDownLatch::new(threads);

        let opened = thread::scope(|scope| {
            let waiter = scope.spawn(|| {
                latch.wait();
                latch.count()
            });

            for _ in 0..threads {
                scope.spawn(|| {
                    latch.count_down();
                    latch.count_down();
                });
            }

            waiter.join().map(|count| count == 0).unwrap_or(false)
        });

        if opened && latch.count() == 0 {
            successes += 1;
        }
    }

    StressResult::new(successes, rounds - successes, start.elapsed(), threads + 1)
}
