//! Condition variable bound to a single [`MutexLock`].
//!
//! `wait` atomically gives up the caller's [`MutexLock`], blocks until the
//! condition is notified, and takes the lock back before returning. Like any
//! condition variable it may return without a matching notification, so
//! callers always wait in a loop:
//!
//! ```
//! use foundation_sync::primitives::{Condition, MutexLock, RawLock};
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let lock = Arc::new(MutexLock::new());
//! let ready = Arc::new(Condition::new(Arc::clone(&lock)));
//! let flag = Arc::new(AtomicBool::new(false));
//!
//! let notifier = {
//!     let (lock, ready, flag) = (Arc::clone(&lock), Arc::clone(&ready), Arc::clone(&flag));
//!     thread::spawn(move || {
//!         let _held = lock.scoped();
//!         flag.store(true, Ordering::Relaxed);
//!         ready.notify();
//!     })
//! };
//!
//! let mut held = lock.scoped();
//! while !flag.load(Ordering::Relaxed) {
//!     ready.wait(&mut held);
//! }
//! drop(held);
//! notifier.join().unwrap();
//! ```

use std::fmt;
use std::ptr;
use std::sync::{Arc, Condvar, PoisonError};
use std::thread;

use super::lock::ScopedLock;
use super::mutex_lock::MutexLock;

/// A condition variable tied to one [`MutexLock`] for its whole lifetime.
pub struct Condition {
    lock: Arc<MutexLock>,
    event: Condvar,
}

impl Condition {
    /// Creates a condition bound to `lock`.
    #[must_use]
    pub fn new(lock: Arc<MutexLock>) -> Self {
        Self {
            lock,
            event: Condvar::new(),
        }
    }

    /// Returns the lock this condition is bound to.
    #[must_use]
    pub fn lock(&self) -> &Arc<MutexLock> {
        &self.lock
    }

    /// Releases the bound lock, blocks until notified, then reacquires it.
    ///
    /// `held` proves the caller owns the bound lock; it is still held when
    /// this returns. Wakeups may be spurious: re-check the awaited state in
    /// a loop around every call.
    ///
    /// # Panics
    ///
    /// Panics if `held` guards a different lock, if the calling thread does
    /// not own the lock, or if the lock is held recursively (releasing one
    /// level would not let other threads in).
    pub fn wait(&self, held: &mut ScopedLock<'_, MutexLock>) {
        assert!(
            ptr::eq(held.source(), Arc::as_ptr(&self.lock)),
            "Condition::wait called with a guard for a different MutexLock"
        );

        let me = thread::current().id();
        let mut state = self.lock.state();
        assert!(
            state.is_held_by(me),
            "Condition::wait called without holding the bound MutexLock"
        );
        assert_eq!(
            state.depth(),
            1,
            "Condition::wait called on a recursively held MutexLock"
        );

        // Surrendering and parking happen under the same OS mutex, so a
        // notifier that needs the MutexLock can only get it once we sleep.
        state.surrender();
        self.lock.wake_contender();
        let state = self
            .event
            .wait(state)
            .unwrap_or_else(PoisonError::into_inner);

        let mut state = self.lock.wait_until_free(state);
        state.claim(me);
    }

    /// Wakes one thread blocked in [`Condition::wait`], if any.
    #[inline]
    pub fn notify(&self) {
        self.event.notify_one();
    }

    /// Wakes every thread blocked in [`Condition::wait`].
    #[inline]
    pub fn notify_all(&self) {
        self.event.notify_all();
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("lock", &self.lock)
            .finish_non_exhaustive()
    }
}
