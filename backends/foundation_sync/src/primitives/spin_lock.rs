//! Busy-waiting lock for very short critical sections.
//!
//! # Examples
//!
//! ```
//! use foundation_sync::primitives::{RawLock, SpinLock};
//!
//! let lock = SpinLock::new();
//!
//! {
//!     let _held = lock.scoped();
//!     assert!(lock.is_locked());
//! } // released here
//!
//! assert!(lock.try_lock());
//! unsafe { lock.unlock() };
//! ```

use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

use super::lock::RawLock;
use super::spin_wait::SpinWait;

/// A spinning [`RawLock`].
///
/// Contended acquisitions spin with exponential backoff and then fall back
/// to yielding the time slice. Prefer [`MutexLock`](super::MutexLock) when
/// the lock may be held for long or while blocking.
pub struct SpinLock {
    locked: AtomicBool,
}

impl SpinLock {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    #[inline]
    fn acquire(&self) -> bool {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    #[cold]
    fn lock_slow(&self) {
        let mut backoff = SpinWait::new();
        loop {
            // Spin on a plain load so contended waiters don't bounce the cache line.
            while self.locked.load(Ordering::Relaxed) {
                backoff.snooze();
            }
            if self.acquire() {
                return;
            }
        }
    }

    /// Attempts to acquire the lock, spinning up to `limit` times.
    #[must_use]
    pub fn try_lock_with_spin_limit(&self, limit: usize) -> bool {
        for _ in 0..limit {
            if self.acquire() {
                return true;
            }
            core::hint::spin_loop();
        }
        false
    }
}

impl RawLock for SpinLock {
    #[inline]
    fn lock(&self) {
        if !self.acquire() {
            self.lock_slow();
        }
    }

    #[inline]
    fn try_lock(&self) -> bool {
        self.acquire()
    }

    /// # Panics
    ///
    /// Panics if the lock is not currently held.
    #[inline]
    unsafe fn unlock(&self) {
        let was_locked = self.locked.swap(false, Ordering::Release);
        assert!(was_locked, "SpinLock::unlock called on an unlocked SpinLock");
    }

    #[inline]
    fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}

impl Default for SpinLock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SpinLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpinLock")
            .field("locked", &self.is_locked())
            .finish()
    }
}
