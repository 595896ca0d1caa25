//! Aggregates for the Order context.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sabor_core::aggregate::Aggregate;
use sabor_core::error::DomainError;
use sabor_core::record::Record;
use sabor_core::validation::FieldErrors;
use sabor_core::{EntityId, IdSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored enum value that matches no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    /// The enum being parsed.
    pub kind: &'static str,
    /// The rejected text.
    pub value: String,
}

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Served at a table.
    DineIn,
    /// Picked up at the counter.
    Takeaway,
    /// Delivered to an address.
    Delivery,
}

impl OrderType {
    /// The wire and storage form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DineIn => "DINE_IN",
            Self::Takeaway => "TAKEAWAY",
            Self::Delivery => "DELIVERY",
        }
    }
}

impl FromStr for OrderType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DINE_IN" => Ok(Self::DineIn),
            "TAKEAWAY" => Ok(Self::Takeaway),
            "DELIVERY" => Ok(Self::Delivery),
            other => Err(UnknownVariant {
                kind: "order type",
                value: other.to_owned(),
            }),
        }
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    /// Cash.
    Cash,
    /// Credit card.
    CreditCard,
    /// Debit card.
    DebitCard,
    /// Wallet app or instant transfer.
    DigitalWallet,
}

impl PaymentType {
    /// The wire and storage form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::CreditCard => "CREDIT_CARD",
            Self::DebitCard => "DEBIT_CARD",
            Self::DigitalWallet => "DIGITAL_WALLET",
        }
    }
}

impl FromStr for PaymentType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CASH" => Ok(Self::Cash),
            "CREDIT_CARD" => Ok(Self::CreditCard),
            "DEBIT_CARD" => Ok(Self::DebitCard),
            "DIGITAL_WALLET" => Ok(Self::DigitalWallet),
            other => Err(UnknownVariant {
                kind: "payment type",
                value: other.to_owned(),
            }),
        }
    }
}

/// Where the order is in the kitchen-to-table flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed, not yet accepted by the kitchen.
    #[default]
    Pending,
    /// Accepted by the kitchen.
    Confirmed,
    /// Ready to be served or handed over.
    Ready,
    /// Served or handed over.
    Delivered,
    /// Cancelled.
    Cancelled,
}

impl OrderStatus {
    /// The wire and storage form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Ready => "READY",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "READY" => Ok(Self::Ready),
            "DELIVERED" => Ok(Self::Delivered),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(UnknownVariant {
                kind: "order status",
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Restaurant taking the order.
    pub restaurant_id: EntityId,
    /// Table the order is for.
    pub table_id: EntityId,
    /// Waiter responsible for the order.
    pub waiter_id: EntityId,
    /// Ordered menu items. An item ordered twice appears twice.
    #[serde(default)]
    pub items_id: Vec<EntityId>,
    /// Total charged.
    pub price: Decimal,
    /// Service mode.
    pub order_type: OrderType,
    /// Payment method.
    pub payment_type: PaymentType,
    /// Current status; new orders default to pending.
    #[serde(default)]
    pub order_status: OrderStatus,
}

impl Aggregate for Order {
    const NAME: &'static str = "order";

    fn parent_id(&self) -> Option<EntityId> {
        Some(self.restaurant_id)
    }
}

impl Order {
    /// The distinct menu items, as checked against the restaurant service.
    #[must_use]
    pub fn item_set(&self) -> IdSet {
        self.items_id.iter().copied().collect()
    }

    /// Checks field-level constraints.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the price is negative or does
    /// not fit `NUMERIC(12, 2)`.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = FieldErrors::new();
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
        errors.into_result()
    }

    /// Applies `input` onto `existing`, keeping its identity and creation time.
    #[must_use]
    pub fn overlay(existing: &Record<Self>, input: Self, now: DateTime<Utc>) -> Record<Self> {
        let Self {
            restaurant_id,
            table_id,
            waiter_id,
            items_id,
            price,
            order_type,
            payment_type,
            order_status,
        } = input;
        existing.revise(
            Self {
                restaurant_id,
                table_id,
                waiter_id,
                items_id,
                price,
                order_type,
                payment_type,
                order_status,
            },
            now,
        )
    }
}

/// `NUMERIC(12, 2)`: trailing zeros do not count towards the scale.
fn fits_price_column(price: Decimal) -> bool {
    price.normalize().scale() <= 2 && price.abs() < Decimal::from(10_000_000_000_i64)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_order_reads_screaming_snake_case_enums() {
        // Arrange
        let body = json!({
            "restaurant_id": 7,
            "table_id": 3,
            "waiter_id": 9,
            "items_id": [101, 101, 102],
            "price": "88.40",
            "order_type": "DINE_IN",
            "payment_type": "DIGITAL_WALLET"
        });

        // Act
        let order: Order = serde_json::from_value(body).unwrap();

        // Assert
        assert_eq!(order.order_type, OrderType::DineIn);
        assert_eq!(order.payment_type, PaymentType::DigitalWallet);
        assert_eq!(order.order_status, OrderStatus::Pending);
        assert_eq!(order.items_id, vec![101, 101, 102]);
        assert_eq!(order.item_set(), IdSet::from([101, 102]));
    }

    #[test]
    fn test_price_must_fit_two_decimal_places() {
        // Arrange
        let order = |price: &str| -> Order {
            serde_json::from_value(json!({
                "restaurant_id": 7,
                "table_id": 3,
                "waiter_id": 9,
                "items_id": [101],
                "price": price,
                "order_type": "TAKEAWAY",
                "payment_type": "CASH"
            }))
            .unwrap()
        };

        // Act
        let fractional = order("19.999").validate();
        let oversized = order("12345678901.00").validate();

        // Assert
        let Err(DomainError::Validation(errors)) = fractional else {
            panic!("expected Validation, got {fractional:?}");
        };
        assert_eq!(
            errors.get("price"),
            Some("price must have at most 10 integer digits and 2 decimal places")
        );
        assert!(matches!(oversized, Err(DomainError::Validation(_))));
        assert!(order("19.900").validate().is_ok());
    }

    #[test]
    fn test_storage_form_parses_back() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Ready,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
        assert_eq!("CREDIT_CARD".parse::<PaymentType>(), Ok(PaymentType::CreditCard));
        assert_eq!("TAKEAWAY".parse::<OrderType>(), Ok(OrderType::Takeaway));
    }

    #[test]
    fn test_unknown_storage_value_is_reported() {
        let err = "PICKUP".parse::<OrderType>().unwrap_err();

        assert_eq!(err.to_string(), "unknown order type: PICKUP");
    }
}
