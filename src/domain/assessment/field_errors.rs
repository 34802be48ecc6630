//! Per-field validation failures.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use super::FieldName;
use crate::domain::foundation::ValidationError;

/// Every failing field of one validation pass, keyed by field.
///
/// Serializes as `{ "<formKey>": "<message>" }` so an input surface can
/// annotate each control directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<FieldName, ValidationError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error for a field, replacing any earlier one.
    pub fn insert(&mut self, field: FieldName, error: ValidationError) {
        self.0.insert(field, error);
    }

    /// Unwraps a field check, recording the error on failure.
    pub fn collect<T>(&mut self, field: FieldName, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.insert(field, error);
                None
            }
        }
    }

    pub fn get(&self, field: FieldName) -> Option<&ValidationError> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Failing fields in form order.
    pub fn fields(&self) -> Vec<FieldName> {
        self.0.keys().copied().collect()
    }

    /// Iterates failing fields with their errors in form order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &ValidationError)> {
        self.0.iter()
    }

    /// User-facing message for a field, if it failed.
    pub fn message(&self, field: FieldName) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.values().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .map(|(field, error)| (field.form_key(), error.to_string())),
        )
    }
}
