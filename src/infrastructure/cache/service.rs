//! Cache service trait and error types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// A serialized response body together with the time it was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Trait for caching processed lookup responses by normalized query.
///
/// Implementations must be thread-safe. Only fresh entries are ever returned:
/// an entry whose age has reached the TTL is reported as a miss even if it is
/// still stored.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process concurrent map
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves a fresh cached response.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(entry))` if an entry exists and `now - created_at < TTL`
    /// - `Ok(None)` if the key is absent or its entry is stale
    async fn get(&self, key: &str) -> CacheResult<Option<CachedResponse>>;

    /// Stores `body` under `key` with the current time, replacing any prior entry.
    async fn set(&self, key: &str, body: &str) -> CacheResult<()>;

    /// Number of stored entries, fresh and stale.
    async fn entry_count(&self) -> usize;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
