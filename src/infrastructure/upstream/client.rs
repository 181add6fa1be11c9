//! Upstream client trait and error types.

use async_trait::async_trait;

/// Errors raised before an upstream response could be read.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),

    #[error("Upstream request timed out: {0}")]
    Timeout(String),

    #[error("{0}")]
    Transport(String),
}

/// Raw upstream reply: status code and the full body as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Resolves a normalized vehicle number against the third-party service.
///
/// Implementations issue exactly one request per call and never retry.
/// Non-success statuses are returned as values; only failures that prevent
/// reading a response are errors.
///
/// # Implementations
///
/// - [`crate::infrastructure::upstream::HttpUpstream`] - `reqwest`-backed HTTP client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Fetches the upstream record for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] when the service is unreachable, the request
    /// times out, or the body cannot be read.
    async fn fetch(&self, query: &str) -> Result<UpstreamResponse, UpstreamError>;
}
