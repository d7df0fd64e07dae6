//! Augmentation gateway configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Augmentation gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// API key for the augmentation service
    pub api_key: Option<String>,

    /// Base URL of the augmentation service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier forwarded with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-call timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl GatewayConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate gateway configuration
    pub fn validate(&self, enrichment_enabled: bool) -> Result<(), ValidationError> {
        if enrichment_enabled && !self.has_api_key() {
            return Err(ValidationError::MissingRequired("GATEWAY_API_KEY"));
        }
        if self.timeout_ms == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl("gateway.base_url"));
        }
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_base_url() -> String {
    "https://augment.studio.example".to_string()
}

fn default_model() -> String {
    "intake-assistant-1".to_string()
}

fn default_timeout_ms() -> u64 {
    4000
}
