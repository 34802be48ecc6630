//! Form fields and their categorical vocabularies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive numeric range accepted for a free-entry field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericBounds {
    pub min: f64,
    pub max: f64,
}

impl NumericBounds {
    pub const AGE: Self = Self::new(1.0, 120.0);
    pub const BMI: Self = Self::new(10.0, 60.0);
    pub const HBA1C: Self = Self::new(3.0, 15.0);
    pub const BLOOD_GLUCOSE: Self = Self::new(50.0, 400.0);

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns true if the value lies within the bounds.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// The eight inputs of a risk assessment.
///
/// Serializes as the form key used by the input surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Gender,
    Age,
    Hypertension,
    HeartDisease,
    SmokingHistory,
    Bmi,
    Hba1c,
    BloodGlucose,
}

impl FieldName {
    /// All fields in form order.
    pub const ALL: [FieldName; 8] = [
        FieldName::Gender,
        FieldName::Age,
        FieldName::Hypertension,
        FieldName::HeartDisease,
        FieldName::SmokingHistory,
        FieldName::Bmi,
        FieldName::Hba1c,
        FieldName::BloodGlucose,
    ];

    /// Key of the field in the submitted form.
    pub fn form_key(&self) -> &'static str {
        match self {
            FieldName::Gender => "gender",
            FieldName::Age => "age",
            FieldName::Hypertension => "hypertension",
            FieldName::HeartDisease => "heartDisease",
            FieldName::SmokingHistory => "smokingHistory",
            FieldName::Bmi => "bmi",
            FieldName::Hba1c => "hba1c",
            FieldName::BloodGlucose => "bloodGlucose",
        }
    }

    /// Human-readable label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            FieldName::Gender => "Gender",
            FieldName::Age => "Age",
            FieldName::Hypertension => "Hypertension",
            FieldName::HeartDisease => "Heart disease",
            FieldName::SmokingHistory => "Smoking history",
            FieldName::Bmi => "BMI",
            FieldName::Hba1c => "HbA1c",
            FieldName::BloodGlucose => "Blood glucose",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.form_key())
    }
}

/// Lowercases and trims a raw option so form spellings compare equal.
fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Gender as selected on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const OPTIONS: [&'static str; 3] = ["male", "female", "other"];

    pub fn parse(raw: &str) -> Option<Self> {
        match normalize(raw).as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// A yes/no answer, sent to the predictor as 1/0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub const OPTIONS: [&'static str; 2] = ["yes", "no"];

    pub fn parse(raw: &str) -> Option<Self> {
        match normalize(raw).as_str() {
            "yes" => Some(YesNo::Yes),
            "no" => Some(YesNo::No),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::Yes => "yes",
            YesNo::No => "no",
        }
    }

    /// Wire encoding: 1 for yes, 0 otherwise.
    pub fn as_bit(&self) -> u8 {
        match self {
            YesNo::Yes => 1,
            YesNo::No => 0,
        }
    }

    pub fn from_bit(bit: u8) -> Option<Self> {
        match bit {
            1 => Some(YesNo::Yes),
            0 => Some(YesNo::No),
            _ => None,
        }
    }
}

/// Smoking history categories understood by the predictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmokingHistory {
    Never,
    Current,
    Former,
    Ever,
    NotCurrent,
}

impl SmokingHistory {
    pub const OPTIONS: [&'static str; 5] = ["never", "current", "former", "ever", "not_current"];

    pub fn parse(raw: &str) -> Option<Self> {
        match normalize(raw).as_str() {
            "never" => Some(SmokingHistory::Never),
            "current" => Some(SmokingHistory::Current),
            "former" => Some(SmokingHistory::Former),
            "ever" => Some(SmokingHistory::Ever),
            "not_current" | "not current" => Some(SmokingHistory::NotCurrent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SmokingHistory::Never => "never",
            SmokingHistory::Current => "current",
            SmokingHistory::Former => "former",
            SmokingHistory::Ever => "ever",
            SmokingHistory::NotCurrent => "not_current",
        }
    }
}
