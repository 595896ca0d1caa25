//! Commands for the Waiter context.

use sabor_core::EntityId;
use sabor_core::command::Command;
use uuid::Uuid;

use crate::domain::aggregates::Waiter;

/// Command to register a new waiter.
#[derive(Debug, Clone)]
pub struct CreateWaiter {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The submitted waiter fields.
    pub input: Waiter,
}

impl Command for CreateWaiter {
    fn command_type(&self) -> &'static str {
        "waiter.create_waiter"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to replace the fields of an existing waiter.
#[derive(Debug, Clone)]
pub struct UpdateWaiter {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The waiter identifier.
    pub waiter_id: EntityId,
    /// The submitted waiter fields.
    pub input: Waiter,
}

impl Command for UpdateWaiter {
    fn command_type(&self) -> &'static str {
        "waiter.update_waiter"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to delete a waiter.
#[derive(Debug, Clone)]
pub struct DeleteWaiter {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The waiter identifier.
    pub waiter_id: EntityId,
}

impl Command for DeleteWaiter {
    fn command_type(&self) -> &'static str {
        "waiter.delete_waiter"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
