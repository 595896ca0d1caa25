//! Commands for the Order context.

use sabor_core::EntityId;
use sabor_core::command::Command;
use uuid::Uuid;

use crate::domain::aggregates::Order;

/// Command to register a new order.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The submitted order fields.
    pub input: Order,
}

impl Command for CreateOrder {
    fn command_type(&self) -> &'static str {
        "order.create_order"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to replace the fields of an existing order.
#[derive(Debug, Clone)]
pub struct UpdateOrder {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The order identifier.
    pub order_id: EntityId,
    /// The submitted order fields.
    pub input: Order,
}

impl Command for UpdateOrder {
    fn command_type(&self) -> &'static str {
        "order.update_order"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to delete a order.
#[derive(Debug, Clone)]
pub struct DeleteOrder {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The order identifier.
    pub order_id: EntityId,
}

impl Command for DeleteOrder {
    fn command_type(&self) -> &'static str {
        "order.delete_order"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
