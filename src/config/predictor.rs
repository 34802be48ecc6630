//! Prediction service configuration

use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Where and how to reach the inference service.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictorConfig {
    /// Full URL of the prediction endpoint
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl PredictorConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate predictor configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.endpoint_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("predictor.endpoint_url"));
        }
        let url = Url::parse(&self.endpoint_url)
            .map_err(|e| ValidationError::InvalidEndpointUrl(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ValidationError::InvalidEndpointUrl(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_endpoint_url() -> String {
    "http://127.0.0.1:8000/predict".to_string()
}

fn default_timeout() -> u64 {
    30
}
