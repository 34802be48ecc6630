//! Prediction module - Outcomes and the submission lifecycle.

mod outcome;
mod submission;

pub use outcome::{Classification, Confidence, FailureReason, PredictionOutcome};
pub use submission::{Attempt, Submission, SubmissionPhase, SubmissionState};
