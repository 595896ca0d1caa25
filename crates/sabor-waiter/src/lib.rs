//! Sabor Digital: Waiter bounded context.
//!
//! Owns the waiters of each restaurant and the tables they serve.

pub mod application;
pub mod domain;
