//! Producer-consumer queue with optional capacity.
//!
//! One [`BlockingQueue`] type covers both modes:
//!
//! - **unbounded** (`capacity == None`): `put` never blocks, `take` blocks
//!   while the queue is empty.
//! - **bounded** (`capacity == Some(n)`): the elements live in a ring buffer
//!   of exactly `n` slots; `put` blocks while it is full, which throttles
//!   producers to the pace of their consumers.
//!
//! Elements come out in the order they went in. Which of several blocked
//! threads wakes first is left to the OS scheduler.
//!
//! # Examples
//!
//! ```
//! use foundation_sync::queue::BlockingQueue;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let queue = Arc::new(BlockingQueue::bounded(2));
//!
//! let producer = {
//!     let queue = Arc::clone(&queue);
//!     thread::spawn(move || {
//!         for i in 0..5 {
//!             queue.put(i);
//!         }
//!     })
//! };
//!
//! let taken: Vec<i32> = (0..5).map(|_| queue.take()).collect();
//! assert_eq!(taken, vec![0, 1, 2, 3, 4]);
//! producer.join().unwrap();
//! ```

mod errors;

pub use errors::*;

use std::collections::VecDeque;
use std::fmt;
use std::num::NonZeroUsize;

use crate::primitives::{Condition, Monitor};

pub struct BlockingQueue<T> {
    items: Monitor<VecDeque<T>>,
    not_empty: Condition,
    not_full: Condition,
    capacity: Option<NonZeroUsize>,
}

impl<T> BlockingQueue<T> {
    /// Creates an unbounded queue.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(None)
    }

    /// Creates an unbounded queue.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::with_capacity(None)
    }

    /// Creates a queue holding at most `max_size` elements.
    ///
    /// # Panics
    ///
    /// Panics if `max_size` is 0.
    #[must_use]
    pub fn bounded(max_size: usize) -> Self {
        let Some(capacity) = NonZeroUsize::new(max_size) else {
            panic!("bounded queue capacity must be > 0");
        };
        Self::with_capacity(Some(capacity))
    }

    /// Creates a queue with the given capacity, `None` meaning unbounded.
    ///
    /// A bounded queue allocates all of its slots up front and never grows.
    #[must_use]
    pub fn with_capacity(capacity: Option<NonZeroUsize>) -> Self {
        let buffer = match capacity {
            Some(limit) => VecDeque::with_capacity(limit.get()),
            None => VecDeque::new(),
        };

        let items = Monitor::new(buffer);
        let not_empty = items.condition();
        let not_full = items.condition();

        Self {
            items,
            not_empty,
            not_full,
            capacity,
        }
    }

    #[inline]
    fn at_capacity(&self, len: usize) -> bool {
        self.capacity.is_some_and(|limit| len >= limit.get())
    }

    /// Appends `item` to the back of the queue.
    ///
    /// On a bounded queue this blocks while the queue is full. An unbounded
    /// queue never blocks here.
    pub fn put(&self, item: T) {
        let mut items = self.items.enter();
        while self.at_capacity(items.len()) {
            tracing::trace!(len = items.len(), "queue full, producer waiting");
            items.wait(&self.not_full);
        }

        items.push_back(item);
        self.not_empty.notify();
    }

    /// Removes and returns the front element, blocking while the queue is empty.
    pub fn take(&self) -> T {
        let mut items = self.items.enter();
        while items.is_empty() {
            tracing::trace!("queue empty, consumer waiting");
            items.wait(&self.not_empty);
        }

        let Some(item) = items.pop_front() else {
            unreachable!("queue drained while its lock was held");
        };

        if self.capacity.is_some() {
            self.not_full.notify();
        }
        item
    }

    /// Appends `item` only if that can be done without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`TryPutError::Full`] carrying `item` when a bounded queue is full.
    pub fn try_put(&self, item: T) -> TryPutResult<T> {
        let mut items = self.items.enter();
        if self.at_capacity(items.len()) {
            return Err(TryPutError::Full(item));
        }

        items.push_back(item);
        self.not_empty.notify();
        Ok(())
    }

    /// Removes the front element if there is one, without blocking.
    pub fn try_take(&self) -> Option<T> {
        let mut items = self.items.enter();
        let item = items.pop_front()?;

        if self.capacity.is_some() {
            self.not_full.notify();
        }
        Some(item)
    }

    /// Removes every queued element in FIFO order without blocking.
    ///
    /// All producers blocked on a full queue are woken.
    pub fn drain(&self) -> Vec<T> {
        let mut items = self.items.enter();
        let drained: Vec<T> = items.drain(..).collect();

        if self.capacity.is_some() && !drained.is_empty() {
            tracing::debug!(drained = drained.len(), "queue drained, waking producers");
            self.not_full.notify_all();
        }
        drained
    }

    /// Returns the number of queued elements.
    ///
    /// This is a snapshot; other threads may change it immediately.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.enter().len()
    }

    /// Alias of [`BlockingQueue::len`].
    #[must_use]
    pub fn size(&self) -> usize {
        self.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.enter().is_empty()
    }

    /// Returns whether a bounded queue is at capacity. Always `false` when unbounded.
    #[must_use]
    pub fn is_full(&self) -> bool {
        let items = self.items.enter();
        self.at_capacity(items.len())
    }

    /// Returns the maximum number of elements, `None` when unbounded.
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity.map(NonZeroUsize::get)
    }

    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.capacity.is_some()
    }
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for BlockingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingQueue")
            .field("len", &self.items.try_enter().map(|items| items.len()))
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}
