//! Sabor Digital: Order bounded context.
//!
//! Owns customer orders. An order points at a restaurant, a table, a waiter
//! and the menu items it contains; all four live in other services and are
//! checked before the order is written.

pub mod application;
pub mod domain;
