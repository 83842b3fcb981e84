//! One-shot countdown latch.
//!
//! A [`CountDownLatch`] starts at a fixed count. Every [`count_down`] lowers
//! it by one and every [`wait`] blocks until it reaches zero. Zero is
//! terminal: the latch never closes again and extra count downs are ignored.
//!
//! [`count_down`]: CountDownLatch::count_down
//! [`wait`]: CountDownLatch::wait
//!
//! # Examples
//!
//! ```
//! use foundation_sync::primitives::CountDownLatch;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let ready = Arc::new(CountDownLatch::new(3));
//!
//! let workers: Vec<_> = (0..3)
//!     .map(|_| {
//!         let ready = Arc::clone(&ready);
//!         thread::spawn(move || ready.count_down())
//!     })
//!     .collect();
//!
//! ready.wait();
//! assert_eq!(ready.count(), 0);
//!
//! for worker in workers {
//!     worker.join().unwrap();
//! }
//! ```

use std::fmt;

use super::condition::Condition;
use super::monitor::Monitor;

pub struct CountDownLatch {
    count: Monitor<usize>,
    released: Condition,
}

impl CountDownLatch {
    /// Creates a latch that opens after `count` calls to [`CountDownLatch::count_down`].
    ///
    /// A latch created with `0` is already open.
    #[must_use]
    pub fn new(count: usize) -> Self {
        let count = Monitor::new(count);
        let released = count.condition();
        Self { count, released }
    }

    /// Blocks until the count reaches zero.
    pub fn wait(&self) {
        let mut count = self.count.enter();
        while *count > 0 {
            tracing::trace!(remaining = *count, "waiting for latch to open");
            count.wait(&self.released);
        }
    }

    /// Decrements the count, waking every waiter when it reaches zero.
    ///
    /// Does nothing once the latch is open.
    pub fn count_down(&self) {
        let mut count = self.count.enter();
        if *count == 0 {
            return;
        }

        *count -= 1;
        if *count == 0 {
            tracing::debug!("latch opened, releasing waiters");
            self.released.notify_all();
        }
    }

    /// Returns the remaining count.
    #[must_use]
    pub fn count(&self) -> usize {
        *self.count.enter()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.count() == 0
    }
}

impl fmt::Debug for CountDownLatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountDownLatch")
            .field("count", &self.count)
            .finish()
    }
}
