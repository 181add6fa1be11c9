//! Query parameters for the lookup endpoint.

use serde::Deserialize;

/// Raw query string of `GET /api/lookup`.
///
/// Four aliases are accepted for the vehicle number; the first non-empty one
/// in the order `query`, `vehicle`, `number`, `vehicle_number` wins.
#[derive(Debug, Default, Deserialize)]
pub struct LookupParams {
    pub query: Option<String>,
    pub vehicle: Option<String>,
    pub number: Option<String>,
    pub vehicle_number: Option<String>,
    pub key: Option<String>,
}

impl LookupParams {
    /// Returns the first non-empty lookup value.
    pub fn lookup_value(&self) -> Option<&str> {
        [
            &self.query,
            &self.vehicle,
            &self.number,
            &self.vehicle_number,
        ]
        .into_iter()
        .filter_map(Option::as_deref)
        .find(|v| !v.is_empty())
    }
}

/// Query parameters read by the access-key middleware.
#[derive(Debug, Default, Deserialize)]
pub struct KeyParam {
    pub key: Option<String>,
}
