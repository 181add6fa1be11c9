//! Normalized vehicle lookup query.

use std::fmt;

/// Minimum length of a normalized vehicle number.
pub const MIN_QUERY_LEN: usize = 8;

/// Errors returned when a raw lookup value cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("missing parameters")]
    Missing,

    #[error("invalid vehicle number format")]
    TooShort { len: usize },
}

/// A trimmed, uppercased vehicle number used both as the upstream query and
/// as the cache key.
///
/// Equivalent inputs such as `"ch01ac9090"`, `" CH01AC9090 "` and
/// `"Ch01Ac9090"` produce the same `LookupQuery`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupQuery(String);

impl LookupQuery {
    /// Normalizes and validates a raw lookup value.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::TooShort`] if the normalized value has fewer than
    /// [`MIN_QUERY_LEN`] characters.
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let normalized = Self::normalize(raw);
        let len = normalized.chars().count();

        if len < MIN_QUERY_LEN {
            return Err(QueryError::TooShort { len });
        }

        Ok(Self(normalized))
    }

    /// Trims surrounding whitespace and uppercases.
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_uppercase()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LookupQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LookupQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
