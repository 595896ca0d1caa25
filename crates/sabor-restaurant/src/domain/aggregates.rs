//! Aggregates for the Restaurant context.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sabor_core::EntityId;
use sabor_core::aggregate::Aggregate;
use sabor_core::error::DomainError;
use sabor_core::record::Record;
use sabor_core::validation::FieldErrors;
use serde::{Deserialize, Serialize};

/// A restaurant. Has no references of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Contact phone, digits with an optional leading `+`.
    pub phone: String,
    /// Public website.
    #[serde(default)]
    pub website: Option<String>,
    /// Logo URL.
    #[serde(default)]
    pub logo: Option<String>,
}

impl Aggregate for Restaurant {
    const NAME: &'static str = "restaurant";
}

impl Restaurant {
    /// Checks field-level constraints.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` listing every offending field.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = FieldErrors::new();
        errors.require_non_empty("name", &self.name, "name must not be blank");
        errors.require_max_chars("name", &self.name, 100, "name must be at most 100 characters");
        errors.require_non_empty("address", &self.address, "address must not be blank");
        errors.require_max_chars(
            "address",
            &self.address,
            255,
            "address must be at most 255 characters",
        );
        errors.require(
            "phone",
            is_phone_number(&self.phone),
            "phone must be 7 to 15 digits with an optional leading +",
        );
        errors.into_result()
    }

    /// Applies `input` onto `existing`, keeping its identity and creation time.
    #[must_use]
    pub fn overlay(existing: &Record<Self>, input: Self, now: DateTime<Utc>) -> Record<Self> {
        let Self {
            name,
            address,
            phone,
            website,
            logo,
        } = input;
        existing.revise(
            Self {
                name,
                address,
                phone,
                website,
                logo,
            },
            now,
        )
    }
}

fn is_phone_number(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);
    (7..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}

/// A menu belonging to a restaurant of this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    /// Owning restaurant.
    pub restaurant_id: EntityId,
    /// Menu title, e.g. "Lunch".
    pub name: String,
}

impl Aggregate for Menu {
    const NAME: &'static str = "menu";

    fn parent_id(&self) -> Option<EntityId> {
        Some(self.restaurant_id)
    }
}

impl Menu {
    /// Checks field-level constraints.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the name is blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = FieldErrors::new();
        errors.require_non_empty("name", &self.name, "name must not be blank");
        errors.into_result()
    }

    /// Applies `input` onto `existing`, keeping its identity and creation time.
    #[must_use]
    pub fn overlay(existing: &Record<Self>, input: Self, now: DateTime<Utc>) -> Record<Self> {
        let Self {
            restaurant_id,
            name,
        } = input;
        existing.revise(
            Self {
                restaurant_id,
                name,
            },
            now,
        )
    }
}

/// A dish or drink listed on a menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Owning menu.
    pub menu_id: EntityId,
    /// Item name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Preparation time in minutes.
    pub preparation_time: i32,
}

impl Aggregate for MenuItem {
    const NAME: &'static str = "menu item";

    fn parent_id(&self) -> Option<EntityId> {
        Some(self.menu_id)
    }
}

impl MenuItem {
    /// Checks field-level constraints.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` listing every offending field.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = FieldErrors::new();
        errors.require_non_empty("name", &self.name, "name must not be blank");
        errors.require(
            "price",
            self.price >= Decimal::ZERO,
            "price must not be negative",
        );
        errors.require(
            "price",
            fits_price_column(self.price),
            "price must have at most 10 integer digits and 2 decimal places",
        );
        errors.require(
            "preparation_time",
            self.preparation_time >= 1,
            "preparation time must be at least 1 minute",
        );
        errors.into_result()
    }

    /// Applies `input` onto `existing`, keeping its identity and creation time.
    #[must_use]
    pub fn overlay(existing: &Record<Self>, input: Self, now: DateTime<Utc>) -> Record<Self> {
        let Self {
            menu_id,
            name,
            price,
            preparation_time,
        } = input;
        existing.revise(
            Self {
                menu_id,
                name,
                price,
                preparation_time,
            },
            now,
        )
    }
}

/// `NUMERIC(12, 2)`: trailing zeros do not count towards the scale.
fn fits_price_column(price: Decimal) -> bool {
    price.normalize().scale() <= 2 && price.abs() < Decimal::from(10_000_000_000_i64)
}
