//! Cache-fronted vehicle lookup service.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::domain::{Branding, LookupQuery, Sanitizer};
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::upstream::{UpstreamClient, UpstreamError};

/// Whether a response was served from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    /// Value for the `X-Proxy-Cache` response header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
        }
    }
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A processed response body and how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOutcome {
    pub body: String,
    pub cache_status: CacheStatus,
}

/// Errors produced by the fetch pipeline. None of them are cached.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The upstream answered with a non-2xx status or an empty body.
    #[error("Vehicle RC API failed: HTTP {status}")]
    UpstreamStatus { status: u16 },

    /// The upstream could not be reached or its body could not be read.
    #[error("Vehicle RC API request error: {0}")]
    UpstreamRequest(#[from] UpstreamError),

    /// Any other failure while processing the response.
    #[error("Unexpected lookup error: {0}")]
    Unexpected(String),
}

/// Parses an upstream body as JSON.
///
/// # Errors
///
/// Returns the parse error when the body is not valid JSON; callers then
/// treat the body as opaque text.
pub fn try_parse_structured(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(text)
}

/// Service that answers lookups from the cache or from the upstream.
///
/// On a miss the upstream body is sanitized, rebranded, serialized and
/// stored, so cache hits return the final text without further work.
pub struct LookupService {
    cache: Arc<dyn CacheService>,
    upstream: Arc<dyn UpstreamClient>,
    sanitizer: Sanitizer,
    branding: Branding,
}

impl LookupService {
    /// Creates a new lookup service.
    pub fn new(
        cache: Arc<dyn CacheService>,
        upstream: Arc<dyn UpstreamClient>,
        sanitizer: Sanitizer,
        branding: Branding,
    ) -> Self {
        Self {
            cache,
            upstream,
            sanitizer,
            branding,
        }
    }

    /// Returns the processed response for `query`, using the cache when fresh.
    ///
    /// # Flow
    ///
    /// 1. Fresh cache entry: return it as [`CacheStatus::Hit`], no upstream call
    /// 2. Otherwise issue one upstream GET
    /// 3. Non-2xx or empty body: fail without touching the cache
    /// 4. Process the body (see [`Self::process_body`])
    /// 5. Store the result, overwriting any stale entry
    /// 6. Return it as [`CacheStatus::Miss`]
    ///
    /// Cache read failures are logged and treated as misses; cache write
    /// failures are logged and do not fail the request.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::UpstreamStatus`] or [`LookupError::UpstreamRequest`]
    /// when the upstream cannot produce a usable body, and
    /// [`LookupError::Unexpected`] if the processed value cannot be serialized.
    pub async fn fetch_or_cached(&self, query: &LookupQuery) -> Result<LookupOutcome, LookupError> {
        let key = query.as_str();

        match self.cache.get(key).await {
            Ok(Some(cached)) => {
                debug!("Serving {} from cache", key);
                return Ok(LookupOutcome {
                    body: cached.body,
                    cache_status: CacheStatus::Hit,
                });
            }
            Ok(None) => {}
            Err(e) => error!("Cache error for {}: {}", key, e),
        }

        let body = self.fetch_upstream(key).await?;
        let processed = self.process_body(&body)?;

        if let Err(e) = self.cache.set(key, &processed).await {
            warn!("Failed to cache response for {}: {}", key, e);
        }

        Ok(LookupOutcome {
            body: processed,
            cache_status: CacheStatus::Miss,
        })
    }

    /// Sanitizes and rebrands a raw upstream body.
    ///
    /// - JSON object: sanitized recursively, branding fields written into it,
    ///   serialized compactly
    /// - JSON array: sanitized recursively and serialized, no branding
    /// - Anything else, scalar JSON included: marker stripped from the raw
    ///   text, trimmed
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Unexpected`] if serialization fails.
    pub fn process_body(&self, raw: &str) -> Result<String, LookupError> {
        match try_parse_structured(raw) {
            Ok(value @ (Value::Object(_) | Value::Array(_))) => {
                let mut cleaned = self.sanitizer.sanitize(&value);
                self.branding.apply(&mut cleaned);
                serde_json::to_string(&cleaned).map_err(|e| LookupError::Unexpected(e.to_string()))
            }
            Ok(_) => {
                debug!("Upstream body is a JSON scalar, cleaning as text");
                Ok(self.sanitizer.clean_text(raw))
            }
            Err(e) => {
                debug!("Upstream body is not JSON ({}), cleaning as text", e);
                Ok(self.sanitizer.clean_text(raw))
            }
        }
    }

    /// Sanitizes a raw body without rebranding.
    pub fn sanitize_only(&self, raw: &str) -> Result<String, LookupError> {
        match try_parse_structured(raw) {
            Ok(value @ (Value::Object(_) | Value::Array(_))) => {
                serde_json::to_string(&self.sanitizer.sanitize(&value))
                    .map_err(|e| LookupError::Unexpected(e.to_string()))
            }
            _ => Ok(self.sanitizer.clean_text(raw)),
        }
    }

    /// Performs one upstream call and returns the body if it is usable.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_or_cached`].
    pub async fn fetch_upstream(&self, key: &str) -> Result<String, LookupError> {
        let response = self.upstream.fetch(key).await.map_err(|e| {
            warn!("Upstream request for {} failed: {}", key, e);
            LookupError::UpstreamRequest(e)
        })?;

        if !response.is_success() || response.body.is_empty() {
            warn!(
                "Upstream returned unusable response for {}: HTTP {} ({} bytes)",
                key,
                response.status,
                response.body.len()
            );
            return Err(LookupError::UpstreamStatus {
                status: response.status,
            });
        }

        Ok(response.body)
    }

    /// Checks if the cache backend is healthy.
    pub async fn cache_healthy(&self) -> bool {
        self.cache.health_check().await
    }

    /// Number of entries held by the cache.
    pub async fn cached_entries(&self) -> usize {
        self.cache.entry_count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::{CacheError, CachedResponse, MemoryCache, MockCacheService};
    use crate::infrastructure::upstream::{MockUpstreamClient, UpstreamResponse};
    use chrono::Utc;
    use mockall::predicate::eq;

    fn query() -> LookupQuery {
        LookupQuery::parse(" ch01ac9090 ").unwrap()
    }

    fn service(cache: Arc<dyn CacheService>, upstream: MockUpstreamClient) -> LookupService {
        LookupService::new(
            cache,
            Arc::new(upstream),
            Sanitizer::new("@oxmzoo", "oxmzoo").unwrap(),
            Branding::default(),
        )
    }

    #[tokio::test]
    async fn test_miss_fetches_sanitizes_and_caches() {
        let mut upstream = MockUpstreamClient::new();
        upstream
            .expect_fetch()
            .with(eq("CH01AC9090"))
            .times(1)
            .returning(|_| {
                Ok(UpstreamResponse::new(
                    200,
                    r#"{"owner":"X @oxmzoo","@oxmzoo_field":"y"}"#,
                ))
            });
        let cache = Arc::new(MemoryCache::new(3600));
        let service = service(cache.clone(), upstream);

        let outcome = service.fetch_or_cached(&query()).await.unwrap();

        assert_eq!(outcome.cache_status, CacheStatus::Miss);
        assert_eq!(
            outcome.body,
            r#"{"owner":"X","developer":"splexxo","credit_by":"splexx","powered_by":"splexxo-info-api"}"#
        );
        let stored = cache.get("CH01AC9090").await.unwrap().unwrap();
        assert_eq!(stored.body, outcome.body);
    }

    #[tokio::test]
    async fn test_hit_skips_upstream() {
        let mut upstream = MockUpstreamClient::new();
        upstream
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(UpstreamResponse::new(200, r#"{"owner":"X"}"#)));
        let service = service(Arc::new(MemoryCache::new(3600)), upstream);

        let first = service.fetch_or_cached(&query()).await.unwrap();
        let second = service
            .fetch_or_cached(&LookupQuery::parse("Ch01Ac9090").unwrap())
            .await
            .unwrap();

        assert_eq!(first.cache_status, CacheStatus::Miss);
        assert_eq!(second.cache_status, CacheStatus::Hit);
        assert_eq!(first.body, second.body);
    }

    #[tokio::test]
    async fn test_non_success_status_is_not_cached() {
        let mut upstream = MockUpstreamClient::new();
        upstream
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(UpstreamResponse::new(500, "boom")));
        let cache = Arc::new(MemoryCache::new(3600));
        let service = service(cache.clone(), upstream);

        let result = service.fetch_or_cached(&query()).await;

        assert!(matches!(
            result,
            Err(LookupError::UpstreamStatus { status: 500 })
        ));
        assert_eq!(cache.entry_count().await, 0);
    }

    #[tokio::test]
    async fn test_empty_body_is_upstream_error() {
        let mut upstream = MockUpstreamClient::new();
        upstream
            .expect_fetch()
            .returning(|_| Ok(UpstreamResponse::new(200, "")));
        let cache = Arc::new(MemoryCache::new(3600));
        let service = service(cache.clone(), upstream);

        let result = service.fetch_or_cached(&query()).await;

        assert!(matches!(
            result,
            Err(LookupError::UpstreamStatus { status: 200 })
        ));
        assert_eq!(cache.entry_count().await, 0);
    }

    #[tokio::test]
    async fn test_transport_failure_is_upstream_error() {
        let mut upstream = MockUpstreamClient::new();
        upstream
            .expect_fetch()
            .returning(|_| Err(UpstreamError::Transport("connection refused".to_string())));
        let service = service(Arc::new(MemoryCache::new(3600)), upstream);

        let result = service.fetch_or_cached(&query()).await;

        assert!(matches!(result, Err(LookupError::UpstreamRequest(_))));
    }

    #[tokio::test]
    async fn test_non_json_body_cleaned_as_text() {
        let mut upstream = MockUpstreamClient::new();
        upstream
            .expect_fetch()
            .returning(|_| Ok(UpstreamResponse::new(200, "  Owner: X @OXMZOO  ")));
        let service = service(Arc::new(MemoryCache::new(3600)), upstream);

        let outcome = service.fetch_or_cached(&query()).await.unwrap();

        assert_eq!(outcome.body, "Owner: X");
        assert_eq!(outcome.cache_status, CacheStatus::Miss);
    }

    #[tokio::test]
    async fn test_cache_read_error_falls_back_to_upstream() {
        let mut cache = MockCacheService::new();
        cache
            .expect_get()
            .returning(|_| Err(CacheError::OperationError("down".to_string())));
        cache.expect_set().times(1).returning(|_, _| Ok(()));

        let mut upstream = MockUpstreamClient::new();
        upstream
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(UpstreamResponse::new(200, "[1,2]")));
        let service = service(Arc::new(cache), upstream);

        let outcome = service.fetch_or_cached(&query()).await.unwrap();

        assert_eq!(outcome.body, "[1,2]");
        assert_eq!(outcome.cache_status, CacheStatus::Miss);
    }

    #[tokio::test]
    async fn test_cache_write_error_does_not_fail_request() {
        let mut cache = MockCacheService::new();
        cache.expect_get().returning(|_| Ok(None));
        cache
            .expect_set()
            .returning(|_, _| Err(CacheError::OperationError("full".to_string())));

        let mut upstream = MockUpstreamClient::new();
        upstream
            .expect_fetch()
            .returning(|_| Ok(UpstreamResponse::new(200, r#"{"a":1}"#)));
        let service = service(Arc::new(cache), upstream);

        assert!(service.fetch_or_cached(&query()).await.is_ok());
    }

    #[tokio::test]
    async fn test_hit_returns_stored_body_verbatim() {
        let mut cache = MockCacheService::new();
        cache.expect_get().with(eq("CH01AC9090")).returning(|_| {
            Ok(Some(CachedResponse {
                body: "stored".to_string(),
                created_at: Utc::now(),
            }))
        });
        cache.expect_set().never();

        let mut upstream = MockUpstreamClient::new();
        upstream.expect_fetch().never();
        let service = service(Arc::new(cache), upstream);

        let outcome = service.fetch_or_cached(&query()).await.unwrap();

        assert_eq!(outcome.body, "stored");
        assert_eq!(outcome.cache_status, CacheStatus::Hit);
    }

    #[test]
    fn test_sanitize_only_skips_branding() {
        let service = service(Arc::new(MemoryCache::new(60)), MockUpstreamClient::new());

        let body = service
            .sanitize_only(r#"{"a":"b @oxmzoo","oxmzoo":1}"#)
            .unwrap();

        assert_eq!(body, r#"{"a":"b"}"#);
    }

    #[test]
    fn test_scalar_json_body_cleaned_as_raw_text() {
        let service = service(Arc::new(MemoryCache::new(60)), MockUpstreamClient::new());

        assert_eq!(service.process_body(r#""x @oxmzoo""#).unwrap(), r#""x ""#);
        assert_eq!(service.process_body(" 42 ").unwrap(), "42");
        assert_eq!(service.process_body("null").unwrap(), "null");
        assert_eq!(service.sanitize_only(r#""@OXMZOO y""#).unwrap(), r#"" y""#);
    }

    #[test]
    fn test_array_json_body_sanitized_without_branding() {
        let service = service(Arc::new(MemoryCache::new(60)), MockUpstreamClient::new());

        let body = service
            .process_body(r#"[" a @oxmzoo ",{"oxmzoo_id":1,"b":2}]"#)
            .unwrap();

        assert_eq!(body, r#"["a",{"b":2}]"#);
    }

    #[test]
    fn test_try_parse_structured() {
        assert!(try_parse_structured(r#"{"a":1}"#).is_ok());
        assert!(try_parse_structured("42").is_ok());
        assert!(try_parse_structured("Owner: X").is_err());
    }
}
