//! Command handlers for the Table context.

use sabor_core::clock::Clock;
use sabor_core::command::Command;
use sabor_core::error::DomainError;
use sabor_core::record::Record;
use sabor_core::repository::Repository;
use sabor_core::service::{load_existing, remove_existing, save_new, save_revision};
use tracing::info;

use crate::domain::aggregates::Table;
use crate::domain::commands::{CreateTable, DeleteTable, UpdateTable};
use crate::domain::references::TableReferences;

/// Handles the `CreateTable` command: validates, verifies the restaurant and
/// waiter references, then persists.
///
/// # Errors
///
/// Returns `DomainError::Validation` for malformed fields,
/// `DomainError::InvalidReference` if a reference does not resolve,
/// `DomainError::DependencyUnavailable` if a peer could not be asked, or
/// `DomainError::OperationFailed` if the store rejects the insert.
pub async fn handle_create_table(
    command: &CreateTable,
    clock: &dyn Clock,
    repo: &dyn Repository<Table>,
    references: TableReferences<'_>,
) -> Result<Record<Table>, DomainError> {
    command.input.validate()?;
    references.verify(&command.input).await.into_result()?;
    let record = save_new(repo, command.input.clone(), clock.now()).await?;
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        table_id = record.id,
        restaurant_id = record.fields.restaurant_id,
        "table created"
    );
    Ok(record)
}

/// Handles the `UpdateTable` command: loads the table, verifies the new
/// references, then persists the overlaid record.
///
/// # Errors
///
/// Returns `DomainError::Validation` for malformed fields,
/// `DomainError::NotFound` if the table does not exist,
/// `DomainError::InvalidReference` or `DomainError::DependencyUnavailable`
/// if verification fails, or `DomainError::OperationFailed` if the store
/// rejects the update.
pub async fn handle_update_table(
    command: &UpdateTable,
    clock: &dyn Clock,
    repo: &dyn Repository<Table>,
    references: TableReferences<'_>,
) -> Result<Record<Table>, DomainError> {
    command.input.validate()?;
    let existing = load_existing(repo, command.table_id).await?;
    references.verify(&command.input).await.into_result()?;
    let revised = Table::overlay(&existing, command.input.clone(), clock.now());
    let record = save_revision(repo, &revised).await?;
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        table_id = record.id,
        "table updated"
    );
    Ok(record)
}

/// Handles the `DeleteTable` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the table does not exist, or
/// `DomainError::OperationFailed` if the store fails to delete it.
pub async fn handle_delete_table(
    command: &DeleteTable,
    repo: &dyn Repository<Table>,
) -> Result<(), DomainError> {
    remove_existing(repo, command.table_id).await?;
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        table_id = command.table_id,
        "table deleted"
    );
    Ok(())
}
