//! Domain layer for the Waiter context.

pub mod aggregates;
pub mod commands;
pub mod references;
