//! Blocking synchronization primitives for OS threads.

pub mod condition;
pub mod latch;
pub mod lock;
pub mod monitor;
pub mod mutex_lock;
pub mod spin_lock;
pub mod spin_wait;

// Re-export the lock capability and its implementations
pub use lock::{RawLock, ScopedLock};
pub use mutex_lock::MutexLock;
pub use spin_lock::SpinLock;

// Re-export waiting helpers
pub use condition::Condition;
pub use latch::CountDownLatch;
pub use monitor::{Monitor, MonitorGuard};
pub use spin_wait::SpinWait;
