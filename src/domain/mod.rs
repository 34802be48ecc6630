//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `assessment` - Risk assessment input schema and validation
//! - `prediction` - Prediction outcomes and the submission lifecycle

pub mod assessment;
pub mod foundation;
pub mod prediction;
