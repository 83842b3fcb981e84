//! Exponential backoff for busy-waiting locks.
//!
//! [`SpinWait`] doubles the number of `spin_loop` hints on every round until
//! [`SPIN_LIMIT`] rounds have elapsed, after which it hands the time slice
//! back to the OS scheduler with [`std::thread::yield_now`] instead.
//!
//! # Examples
//!
//! ```
//! use foundation_sync::primitives::SpinWait;
//! use std::sync::atomic::{AtomicBool, Ordering};
//!
//! let flag = AtomicBool::new(true);
//! let mut backoff = SpinWait::new();
//!
//! while !flag.load(Ordering::Acquire) {
//!     backoff.snooze();
//! }
//! ```

use core::hint;

/// Number of doubling rounds before [`SpinWait::spin`] reports exhaustion.
pub const SPIN_LIMIT: u32 = 10;

/// Exponential backoff state for a single busy-wait sequence.
#[derive(Debug)]
pub struct SpinWait {
    counter: u32,
}

impl SpinWait {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { counter: 0 }
    }

    /// Performs one backoff round of `2^counter` spin hints.
    ///
    /// Returns `false` without spinning once [`SPIN_LIMIT`] rounds have been
    /// used, telling the caller it should stop burning CPU.
    #[inline]
    pub fn spin(&mut self) -> bool {
        if self.counter >= SPIN_LIMIT {
            return false;
        }

        for _ in 0..(1u32 << self.counter) {
            hint::spin_loop();
        }

        self.counter += 1;
        true
    }

    /// Spins while the backoff budget lasts, then yields to the scheduler.
    ///
    /// Unlike [`SpinWait::spin`] this never gives up, which makes it the
    /// right call inside an unbounded acquire loop.
    #[inline]
    pub fn snooze(&mut self) {
        if !self.spin() {
            std::thread::yield_now();
        }
    }

    #[inline]
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    #[inline]
    #[must_use]
    pub fn counter(&self) -> u32 {
        self.counter
    }

    #[inline]
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.counter >= SPIN_LIMIT
    }
}

impl Default for SpinWait {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
