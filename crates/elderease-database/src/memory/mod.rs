//! In-memory store implementations backed by `DashMap`.
//!
//! Ids come from per-store atomic counters starting at 1. Data lives only
//! as long as the process.

pub mod message;
pub mod notification;
pub mod task;
pub mod user;

use std::sync::atomic::{AtomicI64, Ordering};

pub use message::MemoryMessageStore;
pub use notification::MemoryNotificationStore;
pub use task::MemoryTaskStore;
pub use user::MemoryUserStore;

/// Monotonic id generator.
#[derive(Debug)]
pub(crate) struct IdSequence(AtomicI64);

impl IdSequence {
    pub(crate) fn new() -> Self {
        Self(AtomicI64::new(1))
    }

    pub(crate) fn next(&self) -> i64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}
