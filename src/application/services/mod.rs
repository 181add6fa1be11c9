//! Business logic services for the application layer.

pub mod lookup_service;

pub use lookup_service::{
    CacheStatus, LookupError, LookupOutcome, LookupService, try_parse_structured,
};
