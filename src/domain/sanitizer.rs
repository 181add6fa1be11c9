//! Recursive removal of a forbidden marker from upstream payloads.
//!
//! The sanitizer works over [`serde_json::Value`], so every shape an upstream
//! can return (objects, arrays, strings, numbers, booleans, null) is handled by
//! one exhaustive `match`.

use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value};

/// Errors that can occur while building a [`Sanitizer`].
#[derive(Debug, thiserror::Error)]
pub enum SanitizerError {
    #[error("Forbidden marker must not be empty")]
    EmptyMarker,

    #[error("Failed to compile marker pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Strips a forbidden marker from strings and drops object keys that contain it.
///
/// Two markers are tracked:
///
/// - the **text marker** (e.g. `@oxmzoo`) is removed from every string value
/// - the **key marker** (e.g. `oxmzoo`) causes any object entry whose key
///   contains it to be dropped together with its value
///
/// Both comparisons are case-insensitive. Sanitization never fails and never
/// mutates its input.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    text_pattern: Regex,
    key_pattern: Regex,
}

impl Sanitizer {
    /// Builds a sanitizer from the text marker and the key marker.
    ///
    /// # Errors
    ///
    /// Returns [`SanitizerError::EmptyMarker`] if either marker is empty.
    pub fn new(text_marker: &str, key_marker: &str) -> Result<Self, SanitizerError> {
        Ok(Self {
            text_pattern: literal_pattern(text_marker)?,
            key_pattern: literal_pattern(key_marker)?,
        })
    }

    /// Returns a sanitized copy of `value`.
    ///
    /// # Rules
    ///
    /// - **String**: marker occurrences removed, surrounding whitespace trimmed
    /// - **Array**: every element sanitized, order and length preserved
    /// - **Object**: entries with a marked key dropped, remaining values
    ///   sanitized, insertion order preserved
    /// - **Number / Bool / Null**: returned unchanged
    pub fn sanitize(&self, value: &Value) -> Value {
        match value {
            Value::String(s) => Value::String(self.clean_text(s)),
            Value::Array(items) => Value::Array(items.iter().map(|v| self.sanitize(v)).collect()),
            Value::Object(map) => Value::Object(self.sanitize_object(map)),
            Value::Number(_) | Value::Bool(_) | Value::Null => value.clone(),
        }
    }

    /// Removes the text marker from opaque text and trims the result.
    ///
    /// Removal repeats until no occurrence is left, so text such as
    /// `@ox@oxmzoomzoo` cannot reassemble a marker after a single pass.
    pub fn clean_text(&self, text: &str) -> String {
        let mut cleaned = text.to_string();
        while self.text_pattern.is_match(&cleaned) {
            cleaned = self.text_pattern.replace_all(&cleaned, "").into_owned();
        }
        cleaned.trim().to_string()
    }

    /// Returns `true` if an object key must be dropped.
    pub fn is_forbidden_key(&self, key: &str) -> bool {
        self.key_pattern.is_match(key)
    }

    fn sanitize_object(&self, map: &Map<String, Value>) -> Map<String, Value> {
        map.iter()
            .filter(|(key, _)| !self.is_forbidden_key(key))
            .map(|(key, value)| (key.clone(), self.sanitize(value)))
            .collect()
    }
}

/// Compiles a case-insensitive pattern matching `marker` literally.
fn literal_pattern(marker: &str) -> Result<Regex, SanitizerError> {
    if marker.is_empty() {
        return Err(SanitizerError::EmptyMarker);
    }

    Ok(RegexBuilder::new(&regex::escape(marker))
        .case_insensitive(true)
        .build()?)
}
