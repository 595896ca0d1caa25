//! Application layer for the Order context.

pub mod command_handlers;
pub mod query_handlers;
