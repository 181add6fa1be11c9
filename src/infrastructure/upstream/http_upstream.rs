//! `reqwest`-backed upstream client.

use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use super::client::{UpstreamClient, UpstreamError, UpstreamResponse};

/// Characters left unescaped in the `query` value: alphanumerics and
/// `- _ . ! ~ * ' ( )`. A space is sent as `%20`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// HTTP client for the vehicle lookup service.
///
/// Sends `GET <base_url>?query=<normalized>` with no custom headers.
/// Every request is bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: Client,
    base_url: Url,
}

impl HttpUpstream {
    /// Creates a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::InvalidUrl`] if `base_url` does not parse, and
    /// [`UpstreamError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let base_url =
            Url::parse(base_url).map_err(|e| UpstreamError::InvalidUrl(e.to_string()))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        info!("Upstream client ready for {}", base_url);

        Ok(Self { client, base_url })
    }

    /// Builds the request URL with `query` percent-encoded.
    pub fn build_url(&self, query: &str) -> Url {
        let mut url = self.base_url.clone();
        let pair = format!("query={}", utf8_percent_encode(query, QUERY_VALUE));
        let full = match url.query() {
            Some(existing) if !existing.is_empty() => format!("{existing}&{pair}"),
            _ => pair,
        };
        url.set_query(Some(&full));
        url
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstream {
    async fn fetch(&self, query: &str) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.build_url(query);
        debug!("Upstream GET {}", url);

        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;

        debug!("Upstream replied {} ({} bytes)", status, body.len());

        Ok(UpstreamResponse { status, body })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> UpstreamError {
    if e.is_timeout() {
        UpstreamError::Timeout(e.to_string())
    } else {
        UpstreamError::Transport(e.to_string())
    }
}
