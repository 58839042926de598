use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::provider::Provider;
use crate::error::{Error, Result};

/// Well-known configuration keys. Per-provider keys are derived from the
/// provider name, see [`SessionConfig::api_key`] and
/// [`SessionConfig::endpoint_override`].
pub mod keys {
    pub const SOURCE_LANGUAGE: &str = "source_language";
    pub const TARGET_LANGUAGE: &str = "target_language";
    pub const AZURE_REGION: &str = "azure_region";
}

/// Flat key/value configuration bag for one session.
///
/// The core only checks presence of the keys a given handler requires;
/// semantic validation of the values is the vendor's problem.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    values: HashMap<String, String>,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Presence-checked lookup used by handler constructors.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| Error::Configuration {
            key: key.to_string(),
        })
    }

    pub fn with_api_key(self, provider: Provider, value: impl Into<String>) -> Self {
        self.set(api_key_key(provider), value)
    }

    pub fn api_key(&self, provider: Provider) -> Result<&str> {
        self.require(&api_key_key(provider))
    }

    /// Override the vendor base URL; used by tests to point a handler at
    /// a local mock server.
    pub fn with_endpoint(self, provider: Provider, value: impl Into<String>) -> Self {
        self.set(endpoint_key(provider), value)
    }

    pub fn endpoint_override(&self, provider: Provider) -> Option<&str> {
        self.get(&endpoint_key(provider))
    }

    pub fn source_language(&self) -> Option<&str> {
        self.get(keys::SOURCE_LANGUAGE)
    }

    pub fn target_language(&self) -> Result<&str> {
        self.require(keys::TARGET_LANGUAGE)
    }
}

fn api_key_key(provider: Provider) -> String {
    format!("{provider}_api_key")
}

fn endpoint_key(provider: Provider) -> String {
    format!("{provider}_endpoint")
}
