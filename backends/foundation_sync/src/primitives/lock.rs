//! The lock capability and its scoped acquisition guard.
//!
//! [`RawLock`] is the acquire / try-acquire / release surface shared by
//! [`MutexLock`](super::MutexLock) and [`SpinLock`](super::SpinLock). Code
//! that only needs mutual exclusion is written against the trait and the
//! concrete lock is picked at construction time:
//!
//! ```
//! use foundation_sync::primitives::{MutexLock, RawLock, SpinLock};
//!
//! fn critical<L: RawLock>(lock: &L, counter: &mut u32) {
//!     let _held = lock.scoped();
//!     *counter += 1;
//! }
//!
//! let mut counter = 0;
//! critical(&MutexLock::new(), &mut counter);
//! critical(&SpinLock::new(), &mut counter);
//! assert_eq!(counter, 2);
//! ```

use core::fmt;
use core::marker::PhantomData;

/// A mutual-exclusion primitive that does not own the data it protects.
///
/// At most one owner holds the lock at any time. Implementations detect the
/// misuse they can observe (releasing a lock that is not held, releasing
/// from the wrong thread) and panic instead of corrupting their state.
pub trait RawLock {
    /// Acquires the lock, blocking the current thread until it is available.
    fn lock(&self);

    /// Attempts to acquire the lock without blocking.
    ///
    /// Returns `true` when the lock was acquired.
    fn try_lock(&self) -> bool;

    /// Releases the lock.
    ///
    /// # Safety
    ///
    /// The caller must currently hold the lock, acquired through
    /// [`RawLock::lock`] or a successful [`RawLock::try_lock`], and must not
    /// release it a second time. Prefer [`RawLock::scoped`] which pairs the
    /// release with the acquisition automatically.
    unsafe fn unlock(&self);

    /// Returns whether some thread currently holds the lock.
    ///
    /// This is a snapshot and may be stale by the time it is inspected.
    fn is_locked(&self) -> bool;

    /// Acquires the lock and returns a guard that releases it on drop.
    #[inline]
    fn scoped(&self) -> ScopedLock<'_, Self>
    where
        Self: Sized,
    {
        ScopedLock::new(self)
    }

    /// Attempts to acquire the lock without blocking, returning a guard on success.
    #[inline]
    fn try_scoped(&self) -> Option<ScopedLock<'_, Self>>
    where
        Self: Sized,
    {
        ScopedLock::try_new(self)
    }
}

/// RAII guard holding a [`RawLock`] for the duration of a scope.
///
/// The lock is released when the guard is dropped, on every exit path
/// including early return and unwinding. The guard is `!Send`: a lock must
/// be released by the thread that acquired it.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct ScopedLock<'a, L: RawLock + ?Sized> {
    lock: &'a L,
    _not_send: PhantomData<*const ()>,
}

impl<'a, L: RawLock + ?Sized> ScopedLock<'a, L> {
    /// Acquires `lock`, blocking until it is available.
    #[inline]
    pub fn new(lock: &'a L) -> Self {
        lock.lock();
        Self {
            lock,
            _not_send: PhantomData,
        }
    }

    /// Acquires `lock` only if it is immediately available.
    #[inline]
    pub fn try_new(lock: &'a L) -> Option<Self> {
        if lock.try_lock() {
            Some(Self {
                lock,
                _not_send: PhantomData,
            })
        } else {
            None
        }
    }

    /// Returns the lock this guard holds.
    #[inline]
    #[must_use]
    pub fn source(&self) -> &'a L {
        self.lock
    }
}

impl<L: RawLock + ?Sized> Drop for ScopedLock<'_, L> {
    #[inline]
    fn drop(&mut self) {
        // SAFETY: the guard only exists while its lock is held by this thread.
        unsafe { self.lock.unlock() }
    }
}

impl<L: RawLock + ?Sized> fmt::Debug for ScopedLock<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedLock").finish_non_exhaustive()
    }
}
