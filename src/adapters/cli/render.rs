//! Renders pipeline state for a terminal or a machine consumer.

use serde_json::{json, Value};

use crate::domain::assessment::FieldErrors;
use crate::domain::prediction::{FailureReason, PredictionOutcome, SubmissionState};

/// Shown with every classification.
pub const DISCLAIMER: &str = "This result is an estimate from a statistical model and is not a \
medical diagnosis. Consult a healthcare professional about your results.";

/// Output format for rendered results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Renders the display state of a submission.
pub fn render_state(state: &SubmissionState, format: OutputFormat) -> String {
    match state {
        SubmissionState::Completed(outcome) => render_outcome(outcome, format),
        SubmissionState::Idle => match format {
            OutputFormat::Text => "Fill in the form and submit it to get a result.".to_string(),
            OutputFormat::Json => format!("{:#}", json!({ "status": "idle" })),
        },
        SubmissionState::Submitting => match format {
            OutputFormat::Text => "Analyzing...".to_string(),
            OutputFormat::Json => format!("{:#}", json!({ "status": "submitting" })),
        },
    }
}

/// Renders a completed outcome, with the disclaimer on success.
pub fn render_outcome(outcome: &PredictionOutcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => outcome_text(outcome),
        OutputFormat::Json => format!("{:#}", outcome_json(outcome)),
    }
}

/// Renders per-field validation messages.
pub fn render_field_errors(errors: &FieldErrors, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut lines = vec!["Please correct the following:".to_string()];
            lines.extend(
                errors
                    .iter()
                    .map(|(field, error)| format!("  - {}: {}", field.form_key(), error)),
            );
            lines.join("\n")
        }
        OutputFormat::Json => format!("{:#}", json!({ "status": "invalid", "errors": errors })),
    }
}

fn outcome_text(outcome: &PredictionOutcome) -> String {
    match (outcome.classification(), outcome.failure()) {
        (Some(classification), _) => {
            let confidence = outcome
                .confidence()
                .map(|c| format!(" (confidence {})", c))
                .unwrap_or_default();
            format!("Result: {}{}\n\n{}", classification.label(), confidence, DISCLAIMER)
        }
        (None, Some(reason)) => reason.user_message().to_string(),
        (None, None) => FailureReason::USER_MESSAGE.to_string(),
    }
}

fn outcome_json(outcome: &PredictionOutcome) -> Value {
    match (outcome.classification(), outcome.failure()) {
        (Some(classification), _) => json!({
            "status": "completed",
            "result": classification.label(),
            "confidence": outcome.confidence().map(|c| c.value()),
            "disclaimer": DISCLAIMER,
        }),
        (None, reason) => json!({
            "status": "failed",
            "message": FailureReason::USER_MESSAGE,
            "reason": reason,
        }),
    }
}
