//! HTTP middleware for request processing and protection.
//!
//! Provides access-key checks, the CORS header, and observability middleware.

pub mod api_key;
pub mod cors;
pub mod tracing;
