//! Field-level input validation.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::DomainError;

/// Field name → message map collected while validating an input.
///
/// Only the first message per field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` against `field` unless the field already failed.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_insert_with(|| message.into());
    }

    /// Records `message` when `value` is empty or whitespace only.
    pub fn require_non_empty(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.add(field, message);
        }
    }

    /// Records `message` when `value` is longer than `max` characters.
    pub fn require_max_chars(&mut self, field: &str, value: &str, max: usize, message: &str) {
        if value.chars().count() > max {
            self.add(field, message);
        }
    }

    /// Records `message` when `condition` does not hold.
    pub fn require(&mut self, field: &str, condition: bool, message: &str) {
        if !condition {
            self.add(field, message);
        }
    }

    /// Returns `true` when no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the message recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Converts into `Ok(())` when empty, `DomainError::Validation` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` carrying every recorded field.
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}
