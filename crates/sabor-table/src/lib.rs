//! Sabor Digital: Table bounded context.
//!
//! Owns the dining tables of each restaurant and the waiters assigned to
//! them. Restaurants and waiters live in other services and are checked
//! over the network before a table is written.

pub mod application;
pub mod domain;
