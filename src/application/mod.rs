//! Application layer - Orchestrates domain operations through ports.
//!
//! The submission controller is the single entry point for sending a
//! risk assessment: it validates, guards against double submission,
//! calls the predictor and records the outcome.

mod submission_controller;

pub use submission_controller::{SubmissionController, SubmitError};
