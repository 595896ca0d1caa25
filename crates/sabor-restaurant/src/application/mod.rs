//! Application layer for the Restaurant context.

pub mod command_handlers;
pub mod query_handlers;
