//! Application layer for the Waiter context.

pub mod command_handlers;
pub mod query_handlers;
