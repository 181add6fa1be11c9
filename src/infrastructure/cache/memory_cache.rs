//! In-process cache backed by a sharded concurrent map.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use tracing::debug;

use super::service::{CacheResult, CacheService, CachedResponse};
use crate::infrastructure::clock::{Clock, SystemClock};

/// Process-wide response cache with a fixed TTL.
///
/// Entries are never removed. A stale entry stays in the map until the next
/// successful fetch for the same key overwrites it; until then lookups treat
/// it as absent. Each shard is locked independently, so concurrent readers and
/// writers never observe a partially written entry. Concurrent misses on the
/// same key are not deduplicated and the last write wins.
pub struct MemoryCache {
    entries: DashMap<String, CachedResponse>,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl MemoryCache {
    /// Creates an empty cache using the system clock.
    pub fn new(ttl_seconds: u64) -> Self {
        Self::with_clock(ttl_seconds, Arc::new(SystemClock))
    }

    /// Creates an empty cache that reads time from `clock`.
    pub fn with_clock(ttl_seconds: u64, clock: Arc<dyn Clock>) -> Self {
        let ttl = i64::try_from(ttl_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX);

        debug!("Using MemoryCache (TTL: {}s)", ttl_seconds);

        Self {
            entries: DashMap::new(),
            ttl,
            clock,
        }
    }

    fn is_fresh(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(created_at) < self.ttl
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<CachedResponse>> {
        let now = self.clock.now();

        match self.entries.get(key) {
            Some(entry) if self.is_fresh(entry.created_at, now) => {
                debug!("Cache HIT: {}", key);
                Ok(Some(entry.value().clone()))
            }
            Some(_) => {
                debug!("Cache STALE: {}", key);
                Ok(None)
            }
            None => {
                debug!("Cache MISS: {}", key);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, body: &str) -> CacheResult<()> {
        let entry = CachedResponse {
            body: body.to_string(),
            created_at: self.clock.now(),
        };
        self.entries.insert(key.to_string(), entry);
        debug!("Cache SET: {} ({} bytes)", key, body.len());
        Ok(())
    }

    async fn entry_count(&self) -> usize {
        self.entries.len()
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self(Mutex::new(Utc::now())))
        }

        fn advance(&self, seconds: i64) {
            let mut now = self.0.lock().unwrap();
            *now += TimeDelta::seconds(seconds);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    #[tokio::test]
    async fn test_absent_key_is_miss() {
        let cache = MemoryCache::new(60);

        assert!(cache.get("CH01AC9090").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fresh_entry_is_returned() {
        let clock = ManualClock::new();
        let cache = MemoryCache::with_clock(60, clock.clone());

        cache.set("CH01AC9090", r#"{"a":1}"#).await.unwrap();
        clock.advance(59);

        let entry = cache.get("CH01AC9090").await.unwrap().unwrap();
        assert_eq!(entry.body, r#"{"a":1}"#);
    }

    #[tokio::test]
    async fn test_entry_is_stale_at_ttl() {
        let clock = ManualClock::new();
        let cache = MemoryCache::with_clock(60, clock.clone());

        cache.set("CH01AC9090", "body").await.unwrap();
        clock.advance(60);

        assert!(cache.get("CH01AC9090").await.unwrap().is_none());
        // Stale entries stay stored until overwritten.
        assert_eq!(cache.entry_count().await, 1);
    }

    #[tokio::test]
    async fn test_set_overwrites_stale_entry() {
        let clock = ManualClock::new();
        let cache = MemoryCache::with_clock(60, clock.clone());

        cache.set("K", "old").await.unwrap();
        clock.advance(120);
        cache.set("K", "new").await.unwrap();

        let entry = cache.get("K").await.unwrap().unwrap();
        assert_eq!(entry.body, "new");
        assert_eq!(entry.created_at, clock.now());
        assert_eq!(cache.entry_count().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_writes_leave_one_whole_entry() {
        let cache = Arc::new(MemoryCache::new(60));
        let mut handles = Vec::new();

        for i in 0..32 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                cache.set("K", &format!("body-{i}")).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let entry = cache.get("K").await.unwrap().unwrap();
        assert!(entry.body.starts_with("body-"));
        assert_eq!(cache.entry_count().await, 1);
    }
}
