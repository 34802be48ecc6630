//! HTTP Predictor - Implementation of RiskPredictor over JSON/HTTP.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpPredictorConfig::new("http://127.0.0.1:8000/predict")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let predictor = HttpPredictor::new(config)?;
//! ```
//!
//! One POST per call. Failures are reported, never retried.

use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

use crate::config::PredictorConfig;
use crate::ports::{PredictionRequest, PredictionResponse, PredictorError, RiskPredictor};

/// Configuration for the HTTP predictor.
#[derive(Debug, Clone)]
pub struct HttpPredictorConfig {
    /// Full URL of the prediction endpoint.
    pub endpoint_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpPredictorConfig {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&PredictorConfig> for HttpPredictorConfig {
    fn from(config: &PredictorConfig) -> Self {
        Self::new(config.endpoint_url.clone()).with_timeout(config.timeout())
    }
}

/// reqwest-backed prediction client.
pub struct HttpPredictor {
    config: HttpPredictorConfig,
    client: Client,
}

impl HttpPredictor {
    /// Creates a predictor with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `PredictorError::Network` if the client cannot be built.
    pub fn new(config: HttpPredictorConfig) -> Result<Self, PredictorError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PredictorError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn endpoint_url(&self) -> &str {
        &self.config.endpoint_url
    }

    async fn send_request(&self, request: &PredictionRequest) -> Result<Response, PredictorError> {
        self.client
            .post(&self.config.endpoint_url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PredictorError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    PredictorError::network(format!("Connection failed: {}", e))
                } else {
                    PredictorError::network(e.to_string())
                }
            })
    }

    async fn parse_response(&self, response: Response) -> Result<PredictionResponse, PredictorError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Prediction service returned an error status");
            return Err(PredictorError::status(status.as_u16(), body));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                PredictorError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                }
            } else {
                PredictorError::network(format!("Failed to read response: {}", e))
            }
        })?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(body = %body, "Unparseable prediction response");
            PredictorError::parse(format!("Failed to parse response: {}", e))
        })
    }
}

#[async_trait]
impl RiskPredictor for HttpPredictor {
    async fn predict(&self, request: PredictionRequest) -> Result<PredictionResponse, PredictorError> {
        let response = self.send_request(&request).await?;
        self.parse_response(response).await
    }
}
