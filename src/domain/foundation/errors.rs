//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors raised while checking a single form field.
///
/// The `Display` output is the message shown next to the offending control.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("Please select {field}")]
    NotSelected { field: String },

    #[error("{field} must be one of: {allowed}")]
    NotAllowed { field: String, allowed: String },

    #[error("{field} must be a number")]
    NotANumber { field: String },

    #[error("{field} must be at least {min}")]
    BelowMinimum { field: String, min: f64, actual: f64 },

    #[error("{field} must be at most {max}")]
    AboveMaximum { field: String, max: f64, actual: f64 },
}

impl ValidationError {
    /// Creates a missing value error for a free-entry field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required { field: field.into() }
    }

    /// Creates a missing selection error for a choice field.
    pub fn not_selected(field: impl Into<String>) -> Self {
        ValidationError::NotSelected { field: field.into() }
    }

    /// Creates an error for a choice outside the allowed options.
    pub fn not_allowed(field: impl Into<String>, allowed: &[&str]) -> Self {
        ValidationError::NotAllowed {
            field: field.into(),
            allowed: allowed.join(", "),
        }
    }

    /// Creates an unparseable number error.
    pub fn not_a_number(field: impl Into<String>) -> Self {
        ValidationError::NotANumber { field: field.into() }
    }

    /// Creates a lower bound violation.
    pub fn below_minimum(field: impl Into<String>, min: f64, actual: f64) -> Self {
        ValidationError::BelowMinimum {
            field: field.into(),
            min,
            actual,
        }
    }

    /// Creates an upper bound violation.
    pub fn above_maximum(field: impl Into<String>, max: f64, actual: f64) -> Self {
        ValidationError::AboveMaximum {
            field: field.into(),
            max,
            actual,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // State errors
    InvalidStateTransition,
    SubmissionInFlight,
    StaleAttempt,

    // Predictor errors
    PredictorUnavailable,
    MalformedResponse,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::SubmissionInFlight => "SUBMISSION_IN_FLIGHT",
            ErrorCode::StaleAttempt => "STALE_ATTEMPT",
            ErrorCode::PredictorUnavailable => "PREDICTOR_UNAVAILABLE",
            ErrorCode::MalformedResponse => "MALFORMED_RESPONSE",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a state transition error.
    pub fn invalid_transition(from: impl fmt::Debug, to: impl fmt::Debug) -> Self {
        Self::new(
            ErrorCode::InvalidStateTransition,
            format!("Cannot transition from {:?} to {:?}", from, to),
        )
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_displays_field_label() {
        let err = ValidationError::required("Age");
        assert_eq!(err.to_string(), "Age is required");
    }

    #[test]
    fn not_selected_asks_for_a_choice() {
        let err = ValidationError::not_selected("gender");
        assert_eq!(err.to_string(), "Please select gender");
    }

    #[test]
    fn not_allowed_lists_options() {
        let err = ValidationError::not_allowed("Gender", &["male", "female", "other"]);
        assert_eq!(err.to_string(), "Gender must be one of: male, female, other");
    }

    #[test]
    fn bound_errors_name_the_bound() {
        let below = ValidationError::below_minimum("Age", 1.0, 0.0);
        let above = ValidationError::above_maximum("BMI", 60.0, 61.5);
        assert_eq!(below.to_string(), "Age must be at least 1");
        assert_eq!(above.to_string(), "BMI must be at most 60");
    }

    #[test]
    fn decimal_bounds_keep_their_fraction() {
        let err = ValidationError::below_minimum("HbA1c", 3.5, 2.0);
        assert_eq!(err.to_string(), "HbA1c must be at least 3.5");
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::SubmissionInFlight, "Already submitting");
        assert_eq!(format!("{}", err), "[SUBMISSION_IN_FLIGHT] Already submitting");
    }

    #[test]
    fn invalid_transition_names_both_states() {
        let err = DomainError::invalid_transition("Idle", "Completed");
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert!(err.message.contains("Idle"));
        assert!(err.message.contains("Completed"));
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::StaleAttempt, "Result discarded")
            .with_detail("generation", "3");

        assert_eq!(err.details.get("generation"), Some(&"3".to_string()));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::StaleAttempt), "STALE_ATTEMPT");
        assert_eq!(format!("{}", ErrorCode::PredictorUnavailable), "PREDICTOR_UNAVAILABLE");
    }
}
