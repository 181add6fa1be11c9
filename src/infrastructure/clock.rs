//! Time source used for cache expiry.

use chrono::{DateTime, Utc};

/// Source of the current time.
///
/// Injected into [`crate::infrastructure::cache::MemoryCache`] so that TTL
/// behavior can be driven deterministically in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time from the system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
