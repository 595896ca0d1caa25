//! Domain layer for the Order context.

pub mod aggregates;
pub mod commands;
pub mod references;
