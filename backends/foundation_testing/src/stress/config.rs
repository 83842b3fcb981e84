//! Stress test configuration.

use core::num::NonZeroUsize;
use core::time::Duration;

/// Configuration for stress tests.
#[derive(Debug, Clone, Copy)]
pub struct StressConfig {
    /// Number of threads per role (workers, or producers and consumers each)
    thread_count: usize,
    /// Number of iterations per thread
    iterations: usize,
    /// Optional maximum duration for the test
    duration: Option<Duration>,
    /// Queue capacity used by queue scenarios, `None` for unbounded
    capacity: Option<NonZeroUsize>,
}

impl StressConfig {
    /// Creates a new stress test configuration with default values.
    ///
    /// Defaults:
    /// - `thread_count`: 4
    /// - `iterations`: 1000
    /// - `duration`: None (no time limit)
    /// - `capacity`: None (unbounded queues)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            thread_count: 4,
            iterations: 1000,
            duration: None,
            capacity: None,
        }
    }

    /// Sets the number of threads to spawn per role.
    #[must_use]
    pub const fn threads(mut self, count: usize) -> Self {
        self.thread_count = count;
        self
    }

    /// Sets the number of iterations per thread.
    #[must_use]
    pub const fn iterations(mut self, count: usize) -> Self {
        self.iterations = count;
        self
    }

    /// Sets the maximum duration for the test.
    ///
    /// Only the [`StressHarness`](super::StressHarness) honours it; queue
    /// scenarios always run to completion so every blocked thread is released.
    #[must_use]
    pub const fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Bounds the queues built by queue scenarios.
    ///
    /// A `capacity` of 0 leaves the queue unbounded.
    #[must_use]
    pub const fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = NonZeroUsize::new(capacity);
        self
    }

    #[must_use]
    pub const fn get_thread_count(&self) -> usize {
        self.thread_count
    }

    #[must_use]
    pub const fn get_iterations(&self) -> usize {
        self.iterations
    }

    #[must_use]
    pub const fn get_duration(&self) -> Option<Duration> {
        self.duration
    }

    #[must_use]
    pub const fn get_capacity(&self) -> Option<NonZeroUsize> {
        self.capacity
    }
}

impl Default for StressConfig {
    fn default() -> Self {
        Self::new()
    }
}
