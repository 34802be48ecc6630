//! The checked, immutable assessment record.

use serde::Serialize;

use super::{Gender, SmokingHistory, YesNo};

/// A risk assessment whose every field passed validation.
///
/// Only [`validate`](super::validate) builds one, so holding a value is
/// proof that all eight constraints hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedRiskAssessment {
    gender: Gender,
    age: f64,
    hypertension: YesNo,
    heart_disease: YesNo,
    smoking_history: SmokingHistory,
    bmi: f64,
    hba1c: f64,
    blood_glucose: f64,
}

impl ValidatedRiskAssessment {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        gender: Gender,
        age: f64,
        hypertension: YesNo,
        heart_disease: YesNo,
        smoking_history: SmokingHistory,
        bmi: f64,
        hba1c: f64,
        blood_glucose: f64,
    ) -> Self {
        Self {
            gender,
            age,
            hypertension,
            heart_disease,
            smoking_history,
            bmi,
            hba1c,
            blood_glucose,
        }
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn age(&self) -> f64 {
        self.age
    }

    pub fn hypertension(&self) -> YesNo {
        self.hypertension
    }

    pub fn heart_disease(&self) -> YesNo {
        self.heart_disease
    }

    pub fn smoking_history(&self) -> SmokingHistory {
        self.smoking_history
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    /// Glycated hemoglobin, in percent.
    pub fn hba1c(&self) -> f64 {
        self.hba1c
    }

    /// Blood glucose, in mg/dL.
    pub fn blood_glucose(&self) -> f64 {
        self.blood_glucose
    }
}
