//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `STRATEGY_INTAKE_` prefix and nested values use underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use strategy_intake::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod features;
mod gateway;
mod sync;

pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use gateway::GatewayConfig;
pub use sync::SyncConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the intake engine.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Augmentation gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Persistence/analytics sync configuration
    #[serde(default)]
    pub sync: SyncConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `STRATEGY_INTAKE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `STRATEGY_INTAKE__GATEWAY__API_KEY=...` -> `gateway.api_key = ...`
    /// - `STRATEGY_INTAKE__SYNC__TIMEOUT_MS=2000` -> `sync.timeout_ms = 2000`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("STRATEGY_INTAKE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// API keys are only required for the sections whose feature flag is
    /// enabled, so a fully-offline engine can run with an empty environment.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.gateway.validate(self.features.enable_enrichment)?;
        self.sync.validate(self.features.enable_sync)?;
        Ok(())
    }
}
