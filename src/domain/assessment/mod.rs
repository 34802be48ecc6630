//! Assessment module - Input schema and validation.
//!
//! A form arrives as a [`RiskAssessmentInput`] of untrusted values and
//! leaves [`validate`] either as a [`ValidatedRiskAssessment`] or as
//! [`FieldErrors`] naming every control that needs fixing.

mod field;
mod field_errors;
mod input;
mod validated;
mod validator;

pub use field::{FieldName, Gender, NumericBounds, SmokingHistory, YesNo};
pub use field_errors::FieldErrors;
pub use input::{FieldValue, RiskAssessmentInput};
pub use validated::ValidatedRiskAssessment;
pub use validator::validate;
