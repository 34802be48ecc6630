//! Raw form input, as entered and before any checks.

use serde::{Deserialize, Serialize};

use super::FieldName;

/// A single value from a form control.
///
/// Controls deliver either text or a number; neither is trusted yet.
/// Anything else (booleans, arrays, objects) is kept as `Other` so the
/// validator can reject it per field instead of losing the whole form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

/// Unvalidated risk assessment form.
///
/// Every field is optional here; [`validate`](super::validate) decides
/// whether the form can be submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessmentInput {
    pub gender: Option<FieldValue>,
    pub age: Option<FieldValue>,
    pub hypertension: Option<FieldValue>,
    pub heart_disease: Option<FieldValue>,
    pub smoking_history: Option<FieldValue>,
    pub bmi: Option<FieldValue>,
    pub hba1c: Option<FieldValue>,
    pub blood_glucose: Option<FieldValue>,
}

impl RiskAssessmentInput {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, returning the updated form.
    pub fn with(mut self, field: FieldName, value: impl Into<FieldValue>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    /// Clears a field, returning the updated form.
    pub fn without(mut self, field: FieldName) -> Self {
        self.set(field, None);
        self
    }

    /// Returns the raw value of a field.
    pub fn get(&self, field: FieldName) -> Option<&FieldValue> {
        self.slot(field).as_ref()
    }

    /// Replaces the raw value of a field.
    pub fn set(&mut self, field: FieldName, value: Option<FieldValue>) {
        *self.slot_mut(field) = value;
    }

    fn slot(&self, field: FieldName) -> &Option<FieldValue> {
        match field {
            FieldName::Gender => &self.gender,
            FieldName::Age => &self.age,
            FieldName::Hypertension => &self.hypertension,
            FieldName::HeartDisease => &self.heart_disease,
            FieldName::SmokingHistory => &self.smoking_history,
            FieldName::Bmi => &self.bmi,
            FieldName::Hba1c => &self.hba1c,
            FieldName::BloodGlucose => &self.blood_glucose,
        }
    }

    fn slot_mut(&mut self, field: FieldName) -> &mut Option<FieldValue> {
        match field {
            FieldName::Gender => &mut self.gender,
            FieldName::Age => &mut self.age,
            FieldName::Hypertension => &mut self.hypertension,
            FieldName::HeartDisease => &mut self.heart_disease,
            FieldName::SmokingHistory => &mut self.smoking_history,
            FieldName::Bmi => &mut self.bmi,
            FieldName::Hba1c => &mut self.hba1c,
            FieldName::BloodGlucose => &mut self.blood_glucose,
        }
    }
}
