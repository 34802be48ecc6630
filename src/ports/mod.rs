//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `RiskPredictor` - Remote inference service that classifies an assessment

mod predictor;

pub use predictor::{PredictionRequest, PredictionResponse, PredictorError, RiskPredictor};
