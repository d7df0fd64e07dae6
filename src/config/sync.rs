//! Persistence/analytics sync configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Sync backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// API key for the backend
    pub api_key: Option<String>,

    /// Base URL of the backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-call timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl SyncConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate sync configuration
    pub fn validate(&self, sync_enabled: bool) -> Result<(), ValidationError> {
        if sync_enabled && !self.has_api_key() {
            return Err(ValidationError::MissingRequired("SYNC_API_KEY"));
        }
        if self.timeout_ms == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl("sync.base_url"));
        }
        Ok(())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_base_url() -> String {
    "https://intake-api.studio.example".to_string()
}

fn default_timeout_ms() -> u64 {
    4000
}
