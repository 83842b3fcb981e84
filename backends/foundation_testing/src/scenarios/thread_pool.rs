//! Fixed-size thread pool fed by a [`BlockingQueue`].

use std::sync::Arc;
use std::thread;

use foundation_sync::primitives::CountDownLatch;
use foundation_sync::queue::BlockingQueue;

type Job = Box<dyn FnOnce() + Send + 'static>;

enum Message {
    Run(Job),
    Shutdown,
}

/// A thread pool whose job queue applies backpressure to submitters.
///
/// # Examples
///
/// ```
/// use foundation_testing::scenarios::ThreadPool;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let pool = ThreadPool::new(4, 8);
/// let counter = Arc::new(AtomicUsize::new(0));
///
/// for _ in 0..10 {
///     let counter_clone = Arc::clone(&counter);
///     pool.execute(move || {
///         counter_clone.fetch_add(1, Ordering::Relaxed);
///     });
/// }
///
/// // Dropping the pool runs every queued job before the workers exit
/// drop(pool);
/// assert_eq!(counter.load(Ordering::Relaxed), 10);
/// ```
pub struct ThreadPool {
    workers: Vec<thread::JoinHandle<()>>,
    jobs: Arc<BlockingQueue<Message>>,
}

impl ThreadPool {
    /// Creates a pool of `size` workers sharing a queue of `queue_capacity` jobs.
    ///
    /// `new` returns once every worker is running.
    ///
    /// # Panics
    ///
    /// Panics if `size` or `queue_capacity` is 0.
    #[must_use]
    pub fn new(size: usize, queue_capacity: usize) -> Self {
        assert!(size > 0, "ThreadPool size must be > 0");

        let jobs = Arc::new(BlockingQueue::bounded(queue_capacity));
        let started = Arc::new(CountDownLatch::new(size));

        let workers = (0..size)
            .map(|id| {
                let jobs = Arc::clone(&jobs);
                let started = Arc::clone(&started);
                thread::spawn(move || {
                    started.count_down();
                    while let Message::Run(job) = jobs.take() {
                        job();
                    }
                    tracing::trace!(worker = id, "worker shutting down");
                })
            })
            .collect();

        started.wait();
        Self { workers, jobs }
    }

    /// Queues `f`, blocking while the job queue is full.
    pub fn execute<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.jobs.put(Message::Run(Box::new(f)));
    }

    /// Returns the number of jobs waiting for a worker.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.jobs.len()
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        // One shutdown marker per worker, queued behind the outstanding jobs
        for _ in 0..self.workers.len() {
            self.jobs.put(Message::Shutdown);
        }

        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                tracing::warn!("thread pool worker panicked");
            }
        }
    }
}
