//! Aggregates for the Table context.

use chrono::{DateTime, Utc};
use sabor_core::aggregate::Aggregate;
use sabor_core::error::DomainError;
use sabor_core::record::Record;
use sabor_core::validation::FieldErrors;
use sabor_core::{EntityId, IdSet};
use serde::{Deserialize, Serialize};

/// A dining table in a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Owning restaurant, held by the restaurant service.
    pub restaurant_id: EntityId,
    /// Label shown to staff, e.g. "T12" or "Terrace 3".
    pub table_identifier: String,
    /// Waiters serving this table, held by the waiter service.
    #[serde(default)]
    pub waiters_id: IdSet,
}

impl Aggregate for Table {
    const NAME: &'static str = "table";

    fn parent_id(&self) -> Option<EntityId> {
        Some(self.restaurant_id)
    }
}

impl Table {
    /// Checks field-level constraints.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the table identifier is blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = FieldErrors::new();
        errors.require_non_empty(
            "table_identifier",
            &self.table_identifier,
            "table identifier must not be blank",
        );
        errors.into_result()
    }

    /// Applies `input` onto `existing`, keeping its identity and creation time.
    #[must_use]
    pub fn overlay(existing: &Record<Self>, input: Self, now: DateTime<Utc>) -> Record<Self> {
        let Self {
            restaurant_id,
            table_identifier,
            waiters_id,
        } = input;
        existing.revise(
            Self {
                restaurant_id,
                table_identifier,
                waiters_id,
            },
            now,
        )
    }
}
