//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the seams the application layer depends on.
//!
//! # Modules
//!
//! - [`cache`] - Response cache abstraction and in-process implementation
//! - [`clock`] - Time source for cache expiry
//! - [`upstream`] - HTTP client for the vehicle lookup service

pub mod cache;
pub mod clock;
pub mod upstream;
