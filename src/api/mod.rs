//! HTTP API layer for request/response handling.
//!
//! Translates query strings into lookup operations and formats responses.
//! Route composition lives in [`crate::routes`].
//!
//! # Modules
//!
//! - [`dto`] - Query parameter and response types
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Access-key check, CORS, and request tracing

pub mod dto;
pub mod handlers;
pub mod middleware;
