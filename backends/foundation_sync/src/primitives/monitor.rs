//! A value guarded by a [`MutexLock`] together with its conditions.
//!
//! [`Monitor`] pairs the lock with the state it protects so the state can
//! only be reached through a [`MonitorGuard`], and hands out
//! [`Condition`]s bound to that same lock.
//!
//! # Examples
//!
//! ```
//! use foundation_sync::primitives::Monitor;
//!
//! let monitor = Monitor::new(Vec::<u32>::new());
//! let not_empty = monitor.condition();
//!
//! monitor.enter().push(7);
//! not_empty.notify();
//!
//! let mut items = monitor.enter();
//! while items.is_empty() {
//!     items.wait(&not_empty);
//! }
//! assert_eq!(items.pop(), Some(7));
//! ```

use core::cell::UnsafeCell;
use core::fmt;
use core::ops::{Deref, DerefMut};
use std::sync::Arc;

use super::condition::Condition;
use super::lock::{RawLock, ScopedLock};
use super::mutex_lock::MutexLock;

pub struct Monitor<T: ?Sized> {
    lock: Arc<MutexLock>,
    value: UnsafeCell<T>,
}

// SAFETY: the value is only reachable through a guard holding `lock`.
unsafe impl<T: ?Sized + Send> Send for Monitor<T> {}
unsafe impl<T: ?Sized + Send> Sync for Monitor<T> {}

/// Exclusive access to the value of a [`Monitor`].
#[must_use = "the monitor is released as soon as the guard is dropped"]
pub struct MonitorGuard<'a, T: ?Sized> {
    held: ScopedLock<'a, MutexLock>,
    value: &'a UnsafeCell<T>,
}

impl<T> Monitor<T> {
    pub fn new(value: T) -> Self {
        Self {
            lock: Arc::new(MutexLock::new()),
            value: UnsafeCell::new(value),
        }
    }

    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }
}

impl<T: ?Sized> Monitor<T> {
    /// Creates a new [`Condition`] bound to this monitor's lock.
    #[must_use]
    pub fn condition(&self) -> Condition {
        Condition::new(Arc::clone(&self.lock))
    }

    /// Acquires the monitor, blocking until it is available.
    pub fn enter(&self) -> MonitorGuard<'_, T> {
        MonitorGuard {
            held: self.lock.scoped(),
            value: &self.value,
        }
    }

    /// Acquires the monitor only if nobody else holds it.
    pub fn try_enter(&self) -> Option<MonitorGuard<'_, T>> {
        self.lock.try_scoped().map(|held| MonitorGuard {
            held,
            value: &self.value,
        })
    }

    /// Returns a mutable reference without locking; `&mut self` proves exclusivity.
    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }
}

impl<T: Default> Default for Monitor<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Monitor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Monitor");
        match self.try_enter() {
            Some(guard) => d.field("value", &&*guard),
            None => d.field("value", &format_args!("<locked>")),
        };
        d.finish()
    }
}

impl<T: ?Sized> MonitorGuard<'_, T> {
    /// Waits on `condition`, releasing the monitor while blocked.
    ///
    /// # Panics
    ///
    /// Panics if `condition` was not created from this monitor.
    #[inline]
    pub fn wait(&mut self, condition: &Condition) {
        condition.wait(&mut self.held);
    }
}

impl<T: ?Sized> Deref for MonitorGuard<'_, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        // SAFETY: `held` keeps the monitor locked for the guard's lifetime.
        unsafe { &*self.value.get() }
    }
}

impl<T: ?Sized> DerefMut for MonitorGuard<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: as above, and `&mut self` rules out aliasing through this guard.
        unsafe { &mut *self.value.get() }
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for MonitorGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}
