//! Field-by-field validation of a raw assessment form.
//!
//! Each field is parsed and checked on its own, and every failure is
//! reported together so the form can flag all bad controls at once.

use super::{
    FieldErrors, FieldName, FieldValue, Gender, NumericBounds, RiskAssessmentInput,
    SmokingHistory, ValidatedRiskAssessment, YesNo,
};
use crate::domain::foundation::ValidationError;

/// Validates a raw form.
///
/// Pure: no state is kept between calls.
///
/// # Errors
///
/// Returns a [`FieldErrors`] holding one entry per failing field and none
/// for fields that passed.
pub fn validate(raw: &RiskAssessmentInput) -> Result<ValidatedRiskAssessment, FieldErrors> {
    let mut errors = FieldErrors::new();

    let gender = errors.collect(
        FieldName::Gender,
        parse_choice(raw, FieldName::Gender, Gender::parse, &Gender::OPTIONS),
    );
    let age = errors.collect(
        FieldName::Age,
        parse_number(raw, FieldName::Age, NumericBounds::AGE),
    );
    let hypertension = errors.collect(
        FieldName::Hypertension,
        parse_choice(raw, FieldName::Hypertension, YesNo::parse, &YesNo::OPTIONS),
    );
    let heart_disease = errors.collect(
        FieldName::HeartDisease,
        parse_choice(raw, FieldName::HeartDisease, YesNo::parse, &YesNo::OPTIONS),
    );
    let smoking_history = errors.collect(
        FieldName::SmokingHistory,
        parse_choice(
            raw,
            FieldName::SmokingHistory,
            SmokingHistory::parse,
            &SmokingHistory::OPTIONS,
        ),
    );
    let bmi = errors.collect(
        FieldName::Bmi,
        parse_number(raw, FieldName::Bmi, NumericBounds::BMI),
    );
    let hba1c = errors.collect(
        FieldName::Hba1c,
        parse_number(raw, FieldName::Hba1c, NumericBounds::HBA1C),
    );
    let blood_glucose = errors.collect(
        FieldName::BloodGlucose,
        parse_number(raw, FieldName::BloodGlucose, NumericBounds::BLOOD_GLUCOSE),
    );

    match (
        gender,
        age,
        hypertension,
        heart_disease,
        smoking_history,
        bmi,
        hba1c,
        blood_glucose,
    ) {
        (
            Some(gender),
            Some(age),
            Some(hypertension),
            Some(heart_disease),
            Some(smoking_history),
            Some(bmi),
            Some(hba1c),
            Some(blood_glucose),
        ) if errors.is_empty() => Ok(ValidatedRiskAssessment::new(
            gender,
            age,
            hypertension,
            heart_disease,
            smoking_history,
            bmi,
            hba1c,
            blood_glucose,
        )),
        _ => Err(errors),
    }
}

/// Parses a choice field; blank means nothing was selected.
fn parse_choice<T>(
    raw: &RiskAssessmentInput,
    field: FieldName,
    parse: fn(&str) -> Option<T>,
    options: &[&str],
) -> Result<T, ValidationError> {
    match raw.get(field) {
        None => Err(ValidationError::not_selected(field.label().to_lowercase())),
        Some(FieldValue::Text(text)) if text.trim().is_empty() => {
            Err(ValidationError::not_selected(field.label().to_lowercase()))
        }
        Some(FieldValue::Text(text)) => {
            parse(text).ok_or_else(|| ValidationError::not_allowed(field.label(), options))
        }
        Some(FieldValue::Number(_) | FieldValue::Other(_)) => {
            Err(ValidationError::not_allowed(field.label(), options))
        }
    }
}

/// Parses a numeric field and checks it against `bounds`.
fn parse_number(
    raw: &RiskAssessmentInput,
    field: FieldName,
    bounds: NumericBounds,
) -> Result<f64, ValidationError> {
    let value = match raw.get(field) {
        None => return Err(ValidationError::required(field.label())),
        Some(FieldValue::Number(n)) => *n,
        Some(FieldValue::Other(_)) => return Err(ValidationError::not_a_number(field.label())),
        Some(FieldValue::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(ValidationError::required(field.label()));
            }
            text.parse::<f64>()
                .map_err(|_| ValidationError::not_a_number(field.label()))?
        }
    };

    // "NaN" and "inf" parse as f64 but are not measurements.
    if !value.is_finite() {
        return Err(ValidationError::not_a_number(field.label()));
    }

    if bounds.contains(value) {
        Ok(value)
    } else if value < bounds.min {
        Err(ValidationError::below_minimum(field.label(), bounds.min, value))
    } else {
        Err(ValidationError::above_maximum(field.label(), bounds.max, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn scenario_a() -> RiskAssessmentInput {
        RiskAssessmentInput::new()
            .with(FieldName::Gender, "female")
            .with(FieldName::Age, 45)
            .with(FieldName::Hypertension, "no")
            .with(FieldName::HeartDisease, "no")
            .with(FieldName::SmokingHistory, "never")
            .with(FieldName::Bmi, 24.5)
            .with(FieldName::Hba1c, 5.7)
            .with(FieldName::BloodGlucose, 100)
    }

    #[test]
    fn complete_form_validates() {
        let validated = validate(&scenario_a()).unwrap();

        assert_eq!(validated.gender(), Gender::Female);
        assert_eq!(validated.age(), 45.0);
        assert_eq!(validated.hypertension(), YesNo::No);
        assert_eq!(validated.heart_disease(), YesNo::No);
        assert_eq!(validated.smoking_history(), SmokingHistory::Never);
        assert_eq!(validated.bmi(), 24.5);
        assert_eq!(validated.hba1c(), 5.7);
        assert_eq!(validated.blood_glucose(), 100.0);
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let input = scenario_a()
            .with(FieldName::Age, " 45 ")
            .with(FieldName::Bmi, "24.5")
            .with(FieldName::Hba1c, "5.7")
            .with(FieldName::BloodGlucose, "100");

        assert_eq!(validate(&input), validate(&scenario_a()));
    }

    #[test]
    fn age_zero_fails_on_age_only() {
        let errors = validate(&scenario_a().with(FieldName::Age, 0)).unwrap_err();

        assert_eq!(errors.fields(), vec![FieldName::Age]);
        assert_eq!(
            errors.get(FieldName::Age),
            Some(&ValidationError::below_minimum("Age", 1.0, 0.0))
        );
    }

    #[test]
    fn every_violation_is_reported_together() {
        let input = scenario_a()
            .with(FieldName::Age, 150)
            .with(FieldName::Bmi, 5);

        let errors = validate(&input).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.message(FieldName::Age).as_deref(), Some("Age must be at most 120"));
        assert_eq!(errors.message(FieldName::Bmi).as_deref(), Some("BMI must be at least 10"));
    }

    #[test]
    fn empty_form_reports_all_eight_fields() {
        let errors = validate(&RiskAssessmentInput::new()).unwrap_err();

        assert_eq!(errors.fields(), FieldName::ALL.to_vec());
        assert_eq!(
            errors.message(FieldName::SmokingHistory).as_deref(),
            Some("Please select smoking history")
        );
        assert_eq!(
            errors.message(FieldName::BloodGlucose).as_deref(),
            Some("Blood glucose is required")
        );
    }

    #[test]
    fn blank_values_count_as_missing() {
        let input = scenario_a()
            .with(FieldName::Gender, "   ")
            .with(FieldName::Hba1c, "");

        let errors = validate(&input).unwrap_err();

        assert_eq!(errors.get(FieldName::Gender), Some(&ValidationError::not_selected("gender")));
        assert_eq!(errors.get(FieldName::Hba1c), Some(&ValidationError::required("HbA1c")));
    }

    #[test]
    fn non_numeric_text_is_an_error_not_a_panic() {
        let input = scenario_a()
            .with(FieldName::Age, "forty")
            .with(FieldName::BloodGlucose, "NaN")
            .with(FieldName::Bmi, "inf");

        let errors = validate(&input).unwrap_err();

        assert_eq!(errors.get(FieldName::Age), Some(&ValidationError::not_a_number("Age")));
        assert_eq!(
            errors.get(FieldName::BloodGlucose),
            Some(&ValidationError::not_a_number("Blood glucose"))
        );
        assert_eq!(errors.get(FieldName::Bmi), Some(&ValidationError::not_a_number("BMI")));
    }

    #[test]
    fn non_scalar_values_are_field_errors() {
        let input: RiskAssessmentInput = serde_json::from_value(serde_json::json!({
            "gender": "female",
            "age": true,
            "hypertension": "no",
            "heartDisease": "no",
            "smokingHistory": "never",
            "bmi": 5,
            "hba1c": 5.7,
            "bloodGlucose": 100
        }))
        .unwrap();

        let errors = validate(&input).unwrap_err();

        assert_eq!(errors.fields(), vec![FieldName::Age, FieldName::Bmi]);
        assert_eq!(errors.get(FieldName::Age), Some(&ValidationError::not_a_number("Age")));
        assert_eq!(errors.message(FieldName::Bmi).as_deref(), Some("BMI must be at least 10"));
    }

    #[test]
    fn non_scalar_choice_lists_allowed_values() {
        let input = scenario_a().with(
            FieldName::Hypertension,
            FieldValue::Other(serde_json::json!({"answer": "yes"})),
        );

        let errors = validate(&input).unwrap_err();

        assert_eq!(errors.fields(), vec![FieldName::Hypertension]);
        assert_eq!(
            errors.message(FieldName::Hypertension).as_deref(),
            Some("Hypertension must be one of: yes, no")
        );
    }

    #[test]
    fn unknown_option_lists_allowed_values() {
        let errors = validate(&scenario_a().with(FieldName::Hypertension, "sometimes")).unwrap_err();

        assert_eq!(
            errors.message(FieldName::Hypertension).as_deref(),
            Some("Hypertension must be one of: yes, no")
        );
    }

    #[test]
    fn numbers_are_not_accepted_for_choices() {
        let errors = validate(&scenario_a().with(FieldName::HeartDisease, 1)).unwrap_err();
        assert_eq!(errors.fields(), vec![FieldName::HeartDisease]);
    }

    #[test]
    fn decimal_age_is_allowed() {
        let errors = validate(&scenario_a().with(FieldName::Age, "0.5")).unwrap_err();
        assert!(errors.contains(FieldName::Age));

        let validated = validate(&scenario_a().with(FieldName::Age, "1.5")).unwrap();
        assert_eq!(validated.age(), 1.5);
    }

    #[test]
    fn bounds_are_inclusive_at_both_ends() {
        let low = scenario_a()
            .with(FieldName::Age, 1)
            .with(FieldName::Bmi, 10)
            .with(FieldName::Hba1c, 3)
            .with(FieldName::BloodGlucose, 50);
        let high = scenario_a()
            .with(FieldName::Age, 120)
            .with(FieldName::Bmi, 60)
            .with(FieldName::Hba1c, 15)
            .with(FieldName::BloodGlucose, 400);

        assert!(validate(&low).is_ok());
        assert!(validate(&high).is_ok());
    }

    fn choice(options: &'static [&'static str]) -> impl Strategy<Value = &'static str> {
        proptest::sample::select(options)
    }

    fn numeric(lo: f64, hi: f64) -> impl Strategy<Value = (f64, bool)> {
        (lo..=hi, any::<bool>())
    }

    const CHOICE_FIELDS: [FieldName; 4] = [
        FieldName::Gender,
        FieldName::Hypertension,
        FieldName::HeartDisease,
        FieldName::SmokingHistory,
    ];

    /// A value the field must reject: out of range on either side, or not a number.
    fn bad_value(bounds: NumericBounds) -> impl Strategy<Value = FieldValue> {
        prop_oneof![
            ((bounds.min - 1000.0)..(bounds.min - 0.01)).prop_map(FieldValue::Number),
            ((bounds.max + 0.01)..(bounds.max + 1000.0)).prop_map(FieldValue::Number),
            Just(FieldValue::Other(serde_json::Value::Bool(true))),
        ]
    }

    fn value_of(n: f64, as_text: bool) -> FieldValue {
        if as_text {
            FieldValue::Text(n.to_string())
        } else {
            FieldValue::Number(n)
        }
    }

    prop_compose! {
        fn valid_input()(
            gender in choice(&Gender::OPTIONS),
            hypertension in choice(&YesNo::OPTIONS),
            heart_disease in choice(&YesNo::OPTIONS),
            smoking in choice(&SmokingHistory::OPTIONS),
            age in numeric(1.0, 120.0),
            bmi in numeric(10.0, 60.0),
            hba1c in numeric(3.0, 15.0),
            glucose in numeric(50.0, 400.0),
        ) -> (RiskAssessmentInput, [f64; 4]) {
            let input = RiskAssessmentInput::new()
                .with(FieldName::Gender, gender)
                .with(FieldName::Hypertension, hypertension)
                .with(FieldName::HeartDisease, heart_disease)
                .with(FieldName::SmokingHistory, smoking)
                .with(FieldName::Age, value_of(age.0, age.1))
                .with(FieldName::Bmi, value_of(bmi.0, bmi.1))
                .with(FieldName::Hba1c, value_of(hba1c.0, hba1c.1))
                .with(FieldName::BloodGlucose, value_of(glucose.0, glucose.1));
            (input, [age.0, bmi.0, hba1c.0, glucose.0])
        }
    }

    proptest! {
        #[test]
        fn in_range_inputs_validate_to_their_values((input, numbers) in valid_input()) {
            let validated = validate(&input).unwrap();
            prop_assert_eq!(validated.age(), numbers[0]);
            prop_assert_eq!(validated.bmi(), numbers[1]);
            prop_assert_eq!(validated.hba1c(), numbers[2]);
            prop_assert_eq!(validated.blood_glucose(), numbers[3]);
        }

        #[test]
        fn validation_is_idempotent((input, _) in valid_input(), age in -50.0f64..200.0) {
            let input = input.with(FieldName::Age, age);
            prop_assert_eq!(validate(&input), validate(&input));
        }

        #[test]
        fn only_violating_fields_are_reported(
            (input, _) in valid_input(),
            bad_age in proptest::option::of(bad_value(NumericBounds::AGE)),
            bad_bmi in proptest::option::of(bad_value(NumericBounds::BMI)),
            bad_hba1c in proptest::option::of(bad_value(NumericBounds::HBA1C)),
            bad_glucose in proptest::option::of(bad_value(NumericBounds::BLOOD_GLUCOSE)),
            dropped in proptest::sample::subsequence(CHOICE_FIELDS.to_vec(), 0..=CHOICE_FIELDS.len()),
        ) {
            let mut input = input;
            let mut expected = BTreeSet::new();
            let broken = [
                (FieldName::Age, bad_age),
                (FieldName::Bmi, bad_bmi),
                (FieldName::Hba1c, bad_hba1c),
                (FieldName::BloodGlucose, bad_glucose),
            ];
            for (field, bad) in broken {
                if let Some(value) = bad {
                    input.set(field, Some(value));
                    expected.insert(field);
                }
            }
            for field in dropped {
                input.set(field, None);
                expected.insert(field);
            }
            let expected: Vec<FieldName> = expected.into_iter().collect();

            match validate(&input) {
                Ok(_) => prop_assert!(expected.is_empty()),
                Err(errors) => prop_assert_eq!(errors.fields(), expected),
            }
        }
    }
}
