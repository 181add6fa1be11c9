//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod fallback;
pub mod health;
pub mod lookup;

pub use fallback::{method_not_allowed_handler, not_found_handler};
pub use health::health_handler;
pub use lookup::lookup_handler;
