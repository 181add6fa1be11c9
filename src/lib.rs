//! # Vehicle Lookup Proxy
//!
//! A caching, sanitizing HTTP proxy for a third-party vehicle registration
//! lookup service, built with Axum.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Query normalization, sanitizer, branding
//! - **Application Layer** ([`application`]) - Cache-fronted lookup service
//! - **Infrastructure Layer** ([`infrastructure`]) - Response cache and upstream client
//! - **API Layer** ([`api`]) - Handlers, DTOs, and middleware
//!
//! ## Request Pipeline
//!
//! ```text
//! GET /api/lookup?query=ch01ac9090&key=SPLEXXO
//!   -> access key check            (403)
//!   -> normalize "CH01AC9090"      (400 if missing / shorter than 8)
//!   -> cache hit?  -> body, X-Proxy-Cache: HIT
//!   -> upstream GET ?query=...     (502 on failure, nothing cached)
//!   -> sanitize, rebrand, store    -> body, X-Proxy-Cache: MISS
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! export UPSTREAM_URL="https://lookup.example.com/rc"
//! export API_KEYS="SPLEXXO"
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{CacheStatus, LookupError, LookupService};
    pub use crate::domain::{Branding, LookupQuery, Sanitizer};
    pub use crate::error::AppError;
    pub use crate::infrastructure::cache::{CacheService, MemoryCache};
    pub use crate::infrastructure::clock::{Clock, SystemClock};
    pub use crate::infrastructure::upstream::{HttpUpstream, UpstreamClient};
    pub use crate::state::{ApiKeys, AppState};
}
