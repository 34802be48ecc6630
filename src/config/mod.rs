//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `GLYCORISK` prefix
//! and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use glycorisk::config::AppConfig;
//!
//! let config = AppConfig::load_validated(None).expect("Invalid configuration");
//!
//! println!("Predicting via {}", config.predictor.endpoint_url);
//! ```

mod error;
mod logging;
mod predictor;

pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use predictor::PredictorConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration pointing at a local prediction service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Prediction service endpoint and timeout
    #[serde(default)]
    pub predictor: PredictorConfig,

    /// Log level and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `GLYCORISK` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `GLYCORISK__PREDICTOR__ENDPOINT_URL=...` -> `predictor.endpoint_url = ...`
    /// - `GLYCORISK__LOGGING__FORMAT=json` -> `logging.format = json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GLYCORISK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load, apply an optional endpoint override, then validate
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LoadError` if loading fails and
    /// `ConfigError::ValidationFailed` if the result is invalid.
    pub fn load_validated(endpoint_override: Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::load()?;
        if let Some(endpoint) = endpoint_override {
            config.predictor.endpoint_url = endpoint;
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.predictor.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
