//! Stress runs for the blocking primitives.

pub mod latch;
pub mod queue;

pub use latch::run_latch_stress;
pub use queue::{run_queue_stress, verify_delivery, DeliveryError, QueueStressReport};
