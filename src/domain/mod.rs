//! Domain layer: lookup queries, response sanitization and rebranding.
//!
//! Nothing in this layer performs I/O. The types here are shared by the
//! application service and the HTTP handlers.
//!
//! # Modules
//!
//! - [`lookup_query`] - Normalized vehicle number used as cache key
//! - [`sanitizer`] - Recursive forbidden-marker removal over JSON values
//! - [`branding`] - Fixed fields injected into structured responses

pub mod branding;
pub mod lookup_query;
pub mod sanitizer;

pub use branding::Branding;
pub use lookup_query::{LookupQuery, MIN_QUERY_LEN, QueryError};
pub use sanitizer::{Sanitizer, SanitizerError};
