//! Blocking, owner-tracking mutual exclusion.
//!
//! [`MutexLock`] parks contended threads on an OS condition variable instead
//! of spinning. It records which thread owns it, so releasing from the wrong
//! thread is caught immediately, and it is the only lock a
//! [`Condition`](super::Condition) can be bound to.

use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use super::lock::RawLock;

/// Ownership bookkeeping of a [`MutexLock`], protected by the OS mutex.
#[derive(Debug, Default)]
pub(crate) struct LockState {
    owner: Option<ThreadId>,
    depth: usize,
}

impl LockState {
    #[inline]
    pub(crate) fn is_held_by(&self, thread: ThreadId) -> bool {
        self.owner == Some(thread)
    }

    #[inline]
    pub(crate) fn is_free(&self) -> bool {
        self.owner.is_none()
    }

    #[inline]
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub(crate) fn claim(&mut self, thread: ThreadId) {
        self.owner = Some(thread);
        self.depth = 1;
    }

    #[inline]
    pub(crate) fn surrender(&mut self) {
        self.owner = None;
        self.depth = 0;
    }
}

/// A blocking [`RawLock`] with optional recursion.
///
/// A non-recursive lock panics if its owner tries to acquire it again, since
/// that acquisition could never succeed. A recursive lock counts nested
/// acquisitions and is released when the count returns to zero.
pub struct MutexLock {
    state: Mutex<LockState>,
    released: Condvar,
    recursive: bool,
}

impl MutexLock {
    /// Creates a non-recursive lock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_recursion(false)
    }

    /// Creates a lock its owner may acquire repeatedly.
    #[must_use]
    pub fn recursive() -> Self {
        Self::with_recursion(true)
    }

    fn with_recursion(recursive: bool) -> Self {
        Self {
            state: Mutex::new(LockState::default()),
            released: Condvar::new(),
            recursive,
        }
    }

    #[must_use]
    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Returns whether the calling thread owns this lock.
    #[must_use]
    pub fn is_held_by_current_thread(&self) -> bool {
        self.state().is_held_by(thread::current().id())
    }

    /// Locks the bookkeeping mutex.
    ///
    /// No user code ever runs while it is held, so a poisoned state is still
    /// consistent and is recovered.
    #[inline]
    pub(crate) fn state(&self) -> MutexGuard<'_, LockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Blocks on the bookkeeping guard until no thread owns the lock.
    pub(crate) fn wait_until_free<'a>(
        &'a self,
        mut state: MutexGuard<'a, LockState>,
    ) -> MutexGuard<'a, LockState> {
        while !state.is_free() {
            state = self
                .released
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        state
    }

    /// Hands the lock to the next contender after `state` was surrendered.
    #[inline]
    pub(crate) fn wake_contender(&self) {
        self.released.notify_one();
    }

    /// Takes the lock for `me` if it is free or already ours.
    ///
    /// # Panics
    ///
    /// Panics if `me` already owns a non-recursive lock.
    fn enter(&self, state: &mut LockState, me: ThreadId) -> bool {
        if state.is_held_by(me) {
            assert!(
                self.recursive,
                "MutexLock re-acquired by its owner thread: deadlock detected (use MutexLock::recursive)"
            );
            state.depth += 1;
            return true;
        }
        if state.is_free() {
            state.claim(me);
            return true;
        }
        false
    }
}

impl RawLock for MutexLock {
    fn lock(&self) {
        let me = thread::current().id();
        let mut state = self.state();
        if self.enter(&mut state, me) {
            return;
        }

        let mut state = self.wait_until_free(state);
        state.claim(me);
    }

    fn try_lock(&self) -> bool {
        let me = thread::current().id();
        let mut state = self.state();
        if state.is_held_by(me) && !self.recursive {
            return false;
        }
        self.enter(&mut state, me)
    }

    /// # Panics
    ///
    /// Panics if the calling thread does not own the lock.
    unsafe fn unlock(&self) {
        let me = thread::current().id();
        let mut state = self.state();
        assert!(
            state.is_held_by(me),
            "MutexLock::unlock called by a thread that does not own the lock"
        );

        state.depth -= 1;
        if state.depth == 0 {
            state.surrender();
            drop(state);
            self.wake_contender();
        }
    }

    fn is_locked(&self) -> bool {
        !self.state().is_free()
    }
}

impl Default for MutexLock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MutexLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("MutexLock")
            .field("locked", &!state.is_free())
            .field("depth", &state.depth())
            .field("recursive", &self.recursive)
            .finish()
    }
}
