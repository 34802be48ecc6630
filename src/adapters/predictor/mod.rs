//! Risk Predictor Adapters.
//!
//! - `HttpPredictor` - JSON over HTTP to the remote inference service
//! - `MockPredictor` - Configurable mock for testing

mod http_predictor;
mod mock_predictor;

pub use http_predictor::{HttpPredictor, HttpPredictorConfig};
pub use mock_predictor::{MockPredictor, MockReply};
