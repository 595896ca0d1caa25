//! Domain layer for the Table context.

pub mod aggregates;
pub mod commands;
pub mod references;
