//! Blocking synchronization toolkit for OS threads.
//!
//! This crate provides:
//! - **Locks**: the [`RawLock`](primitives::RawLock) capability with a blocking
//!   [`MutexLock`](primitives::MutexLock) and a busy-waiting
//!   [`SpinLock`](primitives::SpinLock), plus RAII
//!   [`ScopedLock`](primitives::ScopedLock) acquisition
//! - **Conditions**: [`Condition`](primitives::Condition) bound to a single
//!   `MutexLock`, and [`Monitor`](primitives::Monitor) which keeps state and
//!   its conditions behind one lock
//! - **Latches**: the one-shot [`CountDownLatch`](primitives::CountDownLatch)
//! - **Queues**: [`BlockingQueue`](queue::BlockingQueue), unbounded or bounded
//!   with backpressure
//!
//! Every blocking call waits indefinitely until another thread satisfies it.
//! An instance cannot be dropped while threads are blocked on it because
//! they borrow it, typically through an [`Arc`](std::sync::Arc).
//!
//! # Examples
//!
//! ```rust
//! use foundation_sync::primitives::CountDownLatch;
//! use foundation_sync::queue::BlockingQueue;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let jobs = Arc::new(BlockingQueue::bounded(8));
//! let done = Arc::new(CountDownLatch::new(2));
//!
//! for _ in 0..2 {
//!     let (jobs, done) = (Arc::clone(&jobs), Arc::clone(&done));
//!     thread::spawn(move || {
//!         let job: u32 = jobs.take();
//!         assert!(job < 2);
//!         done.count_down();
//!     });
//! }
//!
//! jobs.put(0);
//! jobs.put(1);
//! done.wait();
//! assert!(jobs.is_empty());
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod primitives;
pub mod queue;

pub use primitives::{
    Condition, CountDownLatch, Monitor, MonitorGuard, MutexLock, RawLock, ScopedLock, SpinLock,
    SpinWait,
};
pub use queue::{BlockingQueue, TryPutError, TryPutResult};
