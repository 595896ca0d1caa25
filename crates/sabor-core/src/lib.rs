//! Sabor Core: shared domain abstractions.
//!
//! This crate defines the traits and types every restaurant service depends
//! on: the auditing record, the local store and remote client seams, and the
//! two cross-service integrity checks (reference verification before a
//! write, batch reconciliation after a lookup). It contains no
//! infrastructure code.

pub mod aggregate;
pub mod client;
pub mod clock;
pub mod command;
pub mod error;
pub mod reconciler;
pub mod record;
pub mod repository;
pub mod service;
pub mod validation;
pub mod verifier;

/// Store-assigned identity shared by every aggregate.
pub type EntityId = i64;

/// A requested identifier set. Duplicates collapse; iteration is ascending.
pub type IdSet = std::collections::BTreeSet<EntityId>;
