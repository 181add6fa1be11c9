//! Application layer services implementing the lookup pipeline.
//!
//! Services consume the infrastructure traits ([`crate::infrastructure::cache::CacheService`],
//! [`crate::infrastructure::upstream::UpstreamClient`]) and the domain types, and
//! provide a small API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::lookup_service::LookupService`] - Cache-fronted upstream fetch

pub mod services;
