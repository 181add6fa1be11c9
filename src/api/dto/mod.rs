//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for query-string deserialization and JSON serialization.

pub mod health;
pub mod lookup;
