//! Adapters - Implementations of port interfaces and display surfaces.
//!
//! - `predictor` - HTTP and mock implementations of `RiskPredictor`
//! - `cli` - Text and JSON rendering of submission state

pub mod cli;
pub mod predictor;
