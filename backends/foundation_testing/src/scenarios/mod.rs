//! Common synchronization scenarios built on `foundation_sync`.
//!
//! - Thread pools fed by a bounded job queue

pub mod thread_pool;

pub use thread_pool::ThreadPool;
