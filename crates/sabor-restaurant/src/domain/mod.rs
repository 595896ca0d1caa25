//! Domain layer for the Restaurant context.

pub mod aggregates;
pub mod commands;
