//! Rebranding fields injected into every structured upstream response.

use serde_json::Value;

/// Values written into the `developer`, `credit_by` and `powered_by` fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    pub developer: String,
    pub credit_by: String,
    pub powered_by: String,
}

impl Branding {
    pub fn new(
        developer: impl Into<String>,
        credit_by: impl Into<String>,
        powered_by: impl Into<String>,
    ) -> Self {
        Self {
            developer: developer.into(),
            credit_by: credit_by.into(),
            powered_by: powered_by.into(),
        }
    }

    /// Writes the branding fields into a top-level object, replacing any
    /// upstream fields with the same names.
    ///
    /// Non-object values are left untouched: arrays and scalars have no place
    /// to carry named fields.
    pub fn apply(&self, value: &mut Value) {
        if let Value::Object(map) = value {
            map.insert("developer".to_string(), Value::String(self.developer.clone()));
            map.insert("credit_by".to_string(), Value::String(self.credit_by.clone()));
            map.insert("powered_by".to_string(), Value::String(self.powered_by.clone()));
        }
    }
}

impl Default for Branding {
    fn default() -> Self {
        Self::new("splexxo", "splexx", "splexxo-info-api")
    }
}
