//! Commands for the Table context.

use sabor_core::EntityId;
use sabor_core::command::Command;
use uuid::Uuid;

use crate::domain::aggregates::Table;

/// Command to register a new table.
#[derive(Debug, Clone)]
pub struct CreateTable {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The submitted table fields.
    pub input: Table,
}

impl Command for CreateTable {
    fn command_type(&self) -> &'static str {
        "table.create_table"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to replace the fields of an existing table.
#[derive(Debug, Clone)]
pub struct UpdateTable {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The table identifier.
    pub table_id: EntityId,
    /// The submitted table fields.
    pub input: Table,
}

impl Command for UpdateTable {
    fn command_type(&self) -> &'static str {
        "table.update_table"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to delete a table.
#[derive(Debug, Clone)]
pub struct DeleteTable {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The table identifier.
    pub table_id: EntityId,
}

impl Command for DeleteTable {
    fn command_type(&self) -> &'static str {
        "table.delete_table"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
