//! Caching layer for processed lookup responses.
//!
//! Provides a [`CacheService`] trait with an in-process implementation:
//! - [`MemoryCache`] - Concurrent map with TTL-based freshness

mod memory_cache;
mod service;

pub use memory_cache::MemoryCache;
pub use service::{CacheError, CacheResult, CacheService, CachedResponse};

#[cfg(test)]
pub use service::MockCacheService;
