//! Command handlers for the Waiter context.

use sabor_core::clock::Clock;
use sabor_core::command::Command;
use sabor_core::error::DomainError;
use sabor_core::record::Record;
use sabor_core::repository::Repository;
use sabor_core::service::{load_existing, remove_existing, save_new, save_revision};
use tracing::info;

use crate::domain::aggregates::Waiter;
use crate::domain::commands::{CreateWaiter, DeleteWaiter, UpdateWaiter};
use crate::domain::references::WaiterReferences;

/// Handles the `CreateWaiter` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` for malformed fields,
/// `DomainError::InvalidReference` if a reference does not resolve,
/// `DomainError::DependencyUnavailable` if a peer could not be asked, or
/// `DomainError::OperationFailed` if the store rejects the insert.
pub async fn handle_create_waiter(
    command: &CreateWaiter,
    clock: &dyn Clock,
    repo: &dyn Repository<Waiter>,
    references: WaiterReferences<'_>,
) -> Result<Record<Waiter>, DomainError> {
    command.input.validate()?;
    references.verify(&command.input).await.into_result()?;
    let record = save_new(repo, command.input.clone(), clock.now()).await?;
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        waiter_id = record.id,
        restaurant_id = record.fields.restaurant_id,
        "waiter created"
    );
    Ok(record)
}

/// Handles the `UpdateWaiter` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` for malformed fields,
/// `DomainError::NotFound` if the waiter does not exist,
/// `DomainError::InvalidReference` or `DomainError::DependencyUnavailable`
/// if verification fails, or `DomainError::OperationFailed` if the store
/// rejects the update.
pub async fn handle_update_waiter(
    command: &UpdateWaiter,
    clock: &dyn Clock,
    repo: &dyn Repository<Waiter>,
    references: WaiterReferences<'_>,
) -> Result<Record<Waiter>, DomainError> {
    command.input.validate()?;
    let existing = load_existing(repo, command.waiter_id).await?;
    references.verify(&command.input).await.into_result()?;
    let revised = Waiter::overlay(&existing, command.input.clone(), clock.now());
    let record = save_revision(repo, &revised).await?;
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        waiter_id = record.id,
        "waiter updated"
    );
    Ok(record)
}

/// Handles the `DeleteWaiter` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the waiter does not exist, or
/// `DomainError::OperationFailed` if the store fails to delete it.
pub async fn handle_delete_waiter(
    command: &DeleteWaiter,
    repo: &dyn Repository<Waiter>,
) -> Result<(), DomainError> {
    remove_existing(repo, command.waiter_id).await?;
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        waiter_id = command.waiter_id,
        "waiter deleted"
    );
    Ok(())
}
