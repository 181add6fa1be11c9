//! Outbound client for the third-party vehicle lookup service.
//!
//! Provides an [`UpstreamClient`] trait with one implementation:
//! - [`HttpUpstream`] - `reqwest` client with a per-request timeout

mod client;
mod http_upstream;

pub use client::{UpstreamClient, UpstreamError, UpstreamResponse};
pub use http_upstream::HttpUpstream;

#[cfg(test)]
pub use client::MockUpstreamClient;
