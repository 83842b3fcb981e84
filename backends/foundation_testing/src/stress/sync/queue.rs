//! `BlockingQueue` stress runs.

use core::time::Duration;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use foundation_sync::primitives::CountDownLatch;
use foundation_sync::queue::BlockingQueue;

use crate::stress::StressConfig;

/// A delivery guarantee broken by a queue run.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DeliveryError {
    #[display("{missing} produced items were never taken")]
    Lost { missing: usize },

    #[display("item {item} was taken more than once")]
    Duplicated { item: u64 },

    #[display("item {item} was taken but never produced")]
    Unknown { item: u64 },

    #[display("item {item} from producer {producer} was taken before an earlier item")]
    OutOfOrder { producer: u64, item: u64 },
}

/// Outcome of [`run_queue_stress`].
#[derive(Debug, Clone)]
pub struct QueueStressReport {
    /// Items put by all producers
    pub produced: usize,
    /// Items taken by all consumers
    pub consumed: usize,
    /// Largest queue length any producer observed right after a put
    pub max_observed_len: usize,
    /// Wall time from the start gate opening to the last join
    pub duration: Duration,
    /// Whether every item was delivered exactly once and in order
    pub delivery: Result<(), DeliveryError>,
}

impl QueueStressReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.delivery.is_ok() && self.produced == self.consumed
    }
}

/// Checks that `taken` is exactly the items `0..total` with no loss or duplicates,
/// and that each consumer saw every producer's items in ascending order.
///
/// Items are numbered `producer * per_producer + sequence`.
///
/// # Errors
///
/// Returns the first [`DeliveryError`] found.
pub fn verify_delivery(
    per_consumer: &[Vec<u64>],
    total: usize,
    per_producer: usize,
) -> Result<(), DeliveryError> {
    let mut seen = vec![false; total];

    for taken in per_consumer {
        let mut last_by_producer: HashMap<u64, u64> = HashMap::new();

        for &item in taken {
            let Some(slot) = usize::try_from(item).ok().and_then(|i| seen.get_mut(i)) else {
                return Err(DeliveryError::Unknown { item });
            };
            if *slot {
                return Err(DeliveryError::Duplicated { item });
            }
            *slot = true;

            let producer = item / per_producer.max(1) as u64;
            if let Some(previous) = last_by_producer.insert(producer, item) {
                if previous > item {
                    return Err(DeliveryError::OutOfOrder { producer, item });
                }
            }
        }
    }

    match seen.iter().filter(|taken| !**taken).count() {
        0 => Ok(()),
        missing => Err(DeliveryError::Lost { missing }),
    }
}

/// Runs `thread_count` producers against `thread_count` consumers on one queue.
///
/// Each producer puts `iterations` unique items and each consumer takes
/// exactly `iterations`, so every blocked thread is eventually released.
/// The queue is bounded when the config carries a capacity.
///
/// # Examples
///
/// ```
/// use foundation_testing::stress::{StressConfig, sync::run_queue_stress};
///
/// let report = run_queue_stress(StressConfig::new().threads(3).iterations(200).capacity(4));
/// assert!(report.is_clean());
/// assert!(report.max_observed_len <= 4);
/// ```
///
/// # Panics
///
/// Panics if any producer or consumer thread panics.
#[must_use]
pub fn run_queue_stress(config: StressConfig) -> QueueStressReport {
    let threads = config.get_thread_count();
    let iterations = config.get_iterations();
    let total = threads * iterations;

    let queue = Arc::new(BlockingQueue::<u64>::with_capacity(config.get_capacity()));
    let start_gate = Arc::new(CountDownLatch::new(1));
    let max_observed_len = Arc::new(AtomicUsize::new(0));

    let producers: Vec<_> = (0..threads)
        .map(|producer| {
            let queue = Arc::clone(&queue);
            let start_gate = Arc::clone(&start_gate);
            let max_observed_len = Arc::clone(&max_observed_len);
            thread::spawn(move || {
                start_gate.wait();
                let base = (producer * iterations) as u64;
                for sequence in 0..iterations as u64 {
                    queue.put(base + sequence);
                    max_observed_len.fetch_max(queue.len(), Ordering::Relaxed);
                }
            })
        })
        .collect();

    let consumers: Vec<_> = (0..threads)
        .map(|_| {
            let queue = Arc::clone(&queue);
            let start_gate = Arc::clone(&start_gate);
            thread::spawn(move || {
                start_gate.wait();
                (0..iterations).map(|_| queue.take()).collect::<Vec<u64>>()
            })
        })
        .collect();

    tracing::debug!(
        threads,
        iterations,
        capacity = ?config.get_capacity(),
        "starting queue stress run"
    );
    let start = Instant::now();
    start_gate.count_down();

    for producer in producers {
        producer.join().expect("producer panicked during queue stress");
    }
    let per_consumer: Vec<Vec<u64>> = consumers
        .into_iter()
        .map(|consumer| consumer.join().expect("consumer panicked during queue stress"))
        .collect();

    let duration = start.elapsed();
    let consumed = per_consumer.iter().map(Vec::len).sum();

    QueueStressReport {
        produced: total,
        consumed,
        max_observed_len: max_observed_len.load(Ordering::Relaxed),
        duration,
        delivery: verify_delivery(&per_consumer, total, iterations),
    }
}
