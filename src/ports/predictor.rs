//! Risk Predictor Port - Interface to the remote inference service.
//!
//! The port owns the wire contract: the JSON shape posted to the service
//! and the shape read back. Interpreting the returned label is left to
//! the submission controller.
//!
//! # Wire mapping
//!
//! | internal       | wire key              | encoding           |
//! |----------------|-----------------------|--------------------|
//! | gender         | `gender`              | string, unchanged  |
//! | age            | `age`                 | number             |
//! | hypertension   | `hypertension`        | 1 if yes else 0    |
//! | heartDisease   | `heart_disease`       | 1 if yes else 0    |
//! | smokingHistory | `smoking_history`     | string, unchanged  |
//! | bmi            | `bmi`                 | number             |
//! | hba1c          | `HbA1c_level`         | number             |
//! | bloodGlucose   | `blood_glucose_level` | number             |

use async_trait::async_trait;
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::assessment::{
    FieldName, FieldValue, RiskAssessmentInput, ValidatedRiskAssessment, YesNo,
};
use crate::domain::prediction::FailureReason;

/// Port for the remote risk prediction service.
#[async_trait]
pub trait RiskPredictor: Send + Sync {
    /// Posts one request and returns the decoded response body.
    ///
    /// Implementations perform exactly one call and never retry.
    async fn predict(&self, request: PredictionRequest) -> Result<PredictionResponse, PredictorError>;
}

/// Request body posted to the prediction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub gender: String,
    #[serde(serialize_with = "wire_number")]
    pub age: f64,
    pub hypertension: u8,
    pub heart_disease: u8,
    pub smoking_history: String,
    #[serde(serialize_with = "wire_number")]
    pub bmi: f64,
    #[serde(rename = "HbA1c_level", serialize_with = "wire_number")]
    pub hba1c_level: f64,
    #[serde(serialize_with = "wire_number")]
    pub blood_glucose_level: f64,
}

impl From<&ValidatedRiskAssessment> for PredictionRequest {
    fn from(assessment: &ValidatedRiskAssessment) -> Self {
        Self {
            gender: assessment.gender().as_str().to_string(),
            age: assessment.age(),
            hypertension: assessment.hypertension().as_bit(),
            heart_disease: assessment.heart_disease().as_bit(),
            smoking_history: assessment.smoking_history().as_str().to_string(),
            bmi: assessment.bmi(),
            hba1c_level: assessment.hba1c(),
            blood_glucose_level: assessment.blood_glucose(),
        }
    }
}

/// Reads a wire request back into form input, decoding 1/0 as yes/no.
impl From<&PredictionRequest> for RiskAssessmentInput {
    fn from(request: &PredictionRequest) -> Self {
        let flag = |bit: u8| match YesNo::from_bit(bit) {
            Some(answer) => FieldValue::from(answer.as_str()),
            None => FieldValue::from(bit.to_string()),
        };

        RiskAssessmentInput::new()
            .with(FieldName::Gender, request.gender.as_str())
            .with(FieldName::Age, request.age)
            .with(FieldName::Hypertension, flag(request.hypertension))
            .with(FieldName::HeartDisease, flag(request.heart_disease))
            .with(FieldName::SmokingHistory, request.smoking_history.as_str())
            .with(FieldName::Bmi, request.bmi)
            .with(FieldName::Hba1c, request.hba1c_level)
            .with(FieldName::BloodGlucose, request.blood_glucose_level)
    }
}

/// Writes whole numbers as JSON integers (`45`, not `45.0`).
fn wire_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if value.fract() == 0.0 && value.abs() < MAX_EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Response body returned by the prediction service.
///
/// The live service names the label `prediction`; `final_result` is the
/// documented key. Both are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(default, alias = "prediction")]
    pub final_result: Option<String>,
    #[serde(default, alias = "probability", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl PredictionResponse {
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            final_result: Some(label.into()),
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// Predictor errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictorError {
    /// The service could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// No answer within the configured timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The service answered with a non-2xx status.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not the expected JSON.
    #[error("parse error: {0}")]
    Parse(String),
}

impl PredictorError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

impl From<PredictorError> for FailureReason {
    fn from(err: PredictorError) -> Self {
        match err {
            PredictorError::Network(message) => FailureReason::Unreachable(message),
            PredictorError::Timeout { timeout_secs } => FailureReason::Timeout { timeout_secs },
            PredictorError::Status { status, .. } => FailureReason::ServerError { status },
            PredictorError::Parse(message) => FailureReason::MalformedResponse(message),
        }
    }
}
