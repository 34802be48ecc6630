//! Results of a prediction attempt.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ValidationError};

/// Model confidence in its classification, between 0.0 and 1.0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// Creates a Confidence, returning error if outside 0.0..=1.0.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::not_a_number("confidence"));
        }
        if value < 0.0 {
            return Err(ValidationError::below_minimum("confidence", 0.0, value));
        }
        if value > 1.0 {
            return Err(ValidationError::above_maximum("confidence", 1.0, value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the confidence on a 0-100 scale.
    pub fn as_percent(&self) -> f64 {
        self.0 * 100.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.as_percent())
    }
}

/// Binary classification returned by the predictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Diabetic,
    NonDiabetic,
}

impl Classification {
    /// Recognizes a service label, ignoring case, padding and separators.
    ///
    /// Anything outside the known vocabulary yields `None`; it is never
    /// assumed to mean non-diabetic.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "diabetic" => Some(Classification::Diabetic),
            "non-diabetic" | "non diabetic" | "non_diabetic" | "nondiabetic" => {
                Some(Classification::NonDiabetic)
            }
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Classification::Diabetic => "Diabetic",
            Classification::NonDiabetic => "Non-Diabetic",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Why an attempt produced no classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
    #[error("prediction service unreachable: {0}")]
    Unreachable(String),

    #[error("prediction service timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("prediction service returned status {status}")]
    ServerError { status: u16 },

    #[error("malformed prediction response: {0}")]
    MalformedResponse(String),

    #[error("unrecognized classification label: {0:?}")]
    UnrecognizedClassification(String),
}

impl FailureReason {
    /// Message shown to the user, identical for every failure kind.
    pub const USER_MESSAGE: &'static str =
        "Could not reach the prediction server. Please try again.";

    pub fn user_message(&self) -> &'static str {
        Self::USER_MESSAGE
    }

    /// True when the service was never heard from or answered with an error status.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FailureReason::Unreachable(_)
                | FailureReason::Timeout { .. }
                | FailureReason::ServerError { .. }
        )
    }

    pub fn code(&self) -> ErrorCode {
        if self.is_transport() {
            ErrorCode::PredictorUnavailable
        } else {
            ErrorCode::MalformedResponse
        }
    }
}

/// Terminal result of one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionOutcome {
    Diabetic { confidence: Option<Confidence> },
    NonDiabetic { confidence: Option<Confidence> },
    RequestFailed(FailureReason),
}

impl PredictionOutcome {
    pub fn classified(classification: Classification, confidence: Option<Confidence>) -> Self {
        match classification {
            Classification::Diabetic => PredictionOutcome::Diabetic { confidence },
            Classification::NonDiabetic => PredictionOutcome::NonDiabetic { confidence },
        }
    }

    pub fn failed(reason: FailureReason) -> Self {
        PredictionOutcome::RequestFailed(reason)
    }

    /// The classification, or `None` when the request failed.
    pub fn classification(&self) -> Option<Classification> {
        match self {
            PredictionOutcome::Diabetic { .. } => Some(Classification::Diabetic),
            PredictionOutcome::NonDiabetic { .. } => Some(Classification::NonDiabetic),
            PredictionOutcome::RequestFailed(_) => None,
        }
    }

    pub fn confidence(&self) -> Option<Confidence> {
        match self {
            PredictionOutcome::Diabetic { confidence }
            | PredictionOutcome::NonDiabetic { confidence } => *confidence,
            PredictionOutcome::RequestFailed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&FailureReason> {
        match self {
            PredictionOutcome::RequestFailed(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_accepts_unit_interval() {
        assert!(Confidence::try_new(0.0).is_ok());
        assert!(Confidence::try_new(0.42).is_ok());
        assert!(Confidence::try_new(1.0).is_ok());
    }

    #[test]
    fn confidence_rejects_out_of_range_and_nan() {
        assert!(Confidence::try_new(-0.1).is_err());
        assert!(Confidence::try_new(1.01).is_err());
        assert!(Confidence::try_new(f64::NAN).is_err());
    }

    #[test]
    fn confidence_displays_as_percent() {
        assert_eq!(Confidence::try_new(0.873).unwrap().to_string(), "87%");
    }

    #[test]
    fn labels_map_to_classifications() {
        assert_eq!(Classification::from_label("Diabetic"), Some(Classification::Diabetic));
        assert_eq!(
            Classification::from_label("Non-Diabetic"),
            Some(Classification::NonDiabetic)
        );
        assert_eq!(
            Classification::from_label(" non diabetic "),
            Some(Classification::NonDiabetic)
        );
    }

    #[test]
    fn unknown_labels_are_not_guessed() {
        assert_eq!(Classification::from_label(""), None);
        assert_eq!(Classification::from_label("Inconclusive"), None);
        assert_eq!(Classification::from_label("1"), None);
    }

    #[test]
    fn absent_confidence_stays_absent() {
        let outcome = PredictionOutcome::classified(Classification::NonDiabetic, None);
        assert_eq!(outcome, PredictionOutcome::NonDiabetic { confidence: None });
        assert_eq!(outcome.confidence(), None);
    }

    #[test]
    fn failure_has_no_classification() {
        let outcome = PredictionOutcome::failed(FailureReason::Timeout { timeout_secs: 30 });

        assert!(outcome.is_failure());
        assert_eq!(outcome.classification(), None);
        assert_eq!(outcome.confidence(), None);
    }

    #[test]
    fn every_failure_shows_the_same_message() {
        let reasons = [
            FailureReason::Unreachable("refused".to_string()),
            FailureReason::ServerError { status: 502 },
            FailureReason::MalformedResponse("eof".to_string()),
            FailureReason::UnrecognizedClassification("maybe".to_string()),
        ];
        for reason in reasons {
            assert_eq!(reason.user_message(), FailureReason::USER_MESSAGE);
        }
    }

    #[test]
    fn failure_codes_separate_transport_from_parse() {
        assert_eq!(
            FailureReason::ServerError { status: 500 }.code(),
            ErrorCode::PredictorUnavailable
        );
        assert_eq!(
            FailureReason::UnrecognizedClassification(String::new()).code(),
            ErrorCode::MalformedResponse
        );
    }

    #[test]
    fn failure_reason_serializes_adjacently_tagged() {
        let json = serde_json::to_value(FailureReason::ServerError { status: 503 }).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "server_error", "detail": {"status": 503}}));
    }
}
