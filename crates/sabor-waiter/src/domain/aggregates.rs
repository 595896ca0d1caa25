//! Aggregates for the Waiter context.

use chrono::{DateTime, Utc};
use sabor_core::aggregate::Aggregate;
use sabor_core::error::DomainError;
use sabor_core::record::Record;
use sabor_core::validation::FieldErrors;
use sabor_core::{EntityId, IdSet};
use serde::{Deserialize, Serialize};

/// A waiter employed by a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waiter {
    /// Employing restaurant, held by the restaurant service.
    pub restaurant_id: EntityId,
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub lastname: String,
    /// Contact phone.
    pub phone: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Tables this waiter serves, held by the table service.
    #[serde(default)]
    pub tables_id: IdSet,
}

impl Aggregate for Waiter {
    const NAME: &'static str = "waiter";

    fn parent_id(&self) -> Option<EntityId> {
        Some(self.restaurant_id)
    }
}

impl Waiter {
    /// Checks field-level constraints.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` listing every offending field.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = FieldErrors::new();
        errors.require_non_empty("firstname", &self.firstname, "firstname must not be blank");
        errors.require_non_empty("lastname", &self.lastname, "lastname must not be blank");
        errors.require_non_empty("phone", &self.phone, "phone must not be blank");
        if let Some(email) = &self.email {
            errors.require("email", looks_like_email(email), "email must be a valid address");
        }
        errors.into_result()
    }

    /// Applies `input` onto `existing`, keeping its identity and creation time.
    #[must_use]
    pub fn overlay(existing: &Record<Self>, input: Self, now: DateTime<Utc>) -> Record<Self> {
        let Self {
            restaurant_id,
            firstname,
            lastname,
            phone,
            email,
            tables_id,
        } = input;
        existing.revise(
            Self {
                restaurant_id,
                firstname,
                lastname,
                phone,
                email,
                tables_id,
            },
            now,
        )
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !value.chars().any(char::is_whitespace)
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana(email: Option<&str>) -> Waiter {
        Waiter {
            restaurant_id: 1,
            firstname: "Ana".to_owned(),
            lastname: "Souza".to_owned(),
            phone: "+5511912345678".to_owned(),
            email: email.map(str::to_owned),
            tables_id: IdSet::new(),
        }
    }

    #[test]
    fn test_email_is_optional() {
        assert!(ana(None).validate().is_ok());
        assert!(ana(Some("ana.souza@sabor.example")).validate().is_ok());
    }

    #[test]
    fn test_malformed_email_is_rejected() {
        for bad in ["ana", "ana@", "@sabor.example", "ana@sabor", "a b@sabor.example"] {
            let Err(DomainError::Validation(errors)) = ana(Some(bad)).validate() else {
                panic!("expected Validation for {bad}");
            };
            assert_eq!(errors.get("email"), Some("email must be a valid address"));
        }
    }

    #[test]
    fn test_blank_names_are_reported_together() {
        let mut waiter = ana(None);
        waiter.firstname = String::new();
        waiter.lastname = " ".to_owned();

        let Err(DomainError::Validation(errors)) = waiter.validate() else {
            panic!("expected Validation");
        };

        assert!(errors.get("firstname").is_some());
        assert!(errors.get("lastname").is_some());
        assert!(errors.get("phone").is_none());
    }
}
