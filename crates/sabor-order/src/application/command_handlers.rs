//! Command handlers for the Order context.
//!
//! Orders carry the most references of any aggregate: restaurant, table,
//! waiter and the list of menu items. All of them are checked in one
//! concurrent round before the store is touched.

use sabor_core::clock::Clock;
use sabor_core::command::Command;
use sabor_core::error::DomainError;
use sabor_core::record::Record;
use sabor_core::repository::Repository;
use sabor_core::service::{load_existing, remove_existing, save_new, save_revision};
use tracing::info;

use crate::domain::aggregates::Order;
use crate::domain::commands::{CreateOrder, DeleteOrder, UpdateOrder};
use crate::domain::references::OrderReferences;

/// Handles the `CreateOrder` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` for malformed fields,
/// `DomainError::InvalidReference` if a reference does not resolve,
/// `DomainError::DependencyUnavailable` if a peer could not be asked, or
/// `DomainError::OperationFailed` if the store rejects the insert.
pub async fn handle_create_order(
    command: &CreateOrder,
    clock: &dyn Clock,
    repo: &dyn Repository<Order>,
    references: OrderReferences<'_>,
) -> Result<Record<Order>, DomainError> {
    command.input.validate()?;
    references.verify(&command.input).await.into_result()?;
    let record = save_new(repo, command.input.clone(), clock.now()).await?;
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        order_id = record.id,
        restaurant_id = record.fields.restaurant_id,
        order_status = %record.fields.order_status,
        "order created"
    );
    Ok(record)
}

/// Handles the `UpdateOrder` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` for malformed fields,
/// `DomainError::NotFound` if the order does not exist,
/// `DomainError::InvalidReference` or `DomainError::DependencyUnavailable`
/// if verification fails, or `DomainError::OperationFailed` if the store
/// rejects the update.
pub async fn handle_update_order(
    command: &UpdateOrder,
    clock: &dyn Clock,
    repo: &dyn Repository<Order>,
    references: OrderReferences<'_>,
) -> Result<Record<Order>, DomainError> {
    command.input.validate()?;
    let existing = load_existing(repo, command.order_id).await?;
    references.verify(&command.input).await.into_result()?;
    let revised = Order::overlay(&existing, command.input.clone(), clock.now());
    let record = save_revision(repo, &revised).await?;
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        order_id = record.id,
        order_status = %record.fields.order_status,
        "order updated"
    );
    Ok(record)
}

/// Handles the `DeleteOrder` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the order does not exist, or
/// `DomainError::OperationFailed` if the store fails to delete it.
pub async fn handle_delete_order(
    command: &DeleteOrder,
    repo: &dyn Repository<Order>,
) -> Result<(), DomainError> {
    remove_existing(repo, command.order_id).await?;
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        order_id = command.order_id,
        "order deleted"
    );
    Ok(())
}
