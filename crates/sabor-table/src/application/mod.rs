//! Application layer for the Table context.

pub mod command_handlers;
pub mod query_handlers;
