//! Shared application state injected into handlers and middleware.

use std::collections::HashSet;
use std::sync::Arc;

use crate::application::services::LookupService;

/// Static access-key allow-list.
#[derive(Debug, Clone, Default)]
pub struct ApiKeys(HashSet<String>);

impl ApiKeys {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    /// Returns `true` if the trimmed key is in the allow-list.
    pub fn allows(&self, key: &str) -> bool {
        self.0.contains(key.trim())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub lookup_service: Arc<LookupService>,
    pub api_keys: Arc<ApiKeys>,
}

impl AppState {
    pub fn new(lookup_service: Arc<LookupService>, api_keys: ApiKeys) -> Self {
        Self {
            lookup_service,
            api_keys: Arc::new(api_keys),
        }
    }
}
