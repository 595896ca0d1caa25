//! Store steps shared by every aggregate service.
//!
//! Command handlers in each bounded context validate input and verify
//! references themselves, then call into these helpers for the store side:
//! loading an existing record, persisting a new or revised record, and
//! removing one. Store failures on the write path are wrapped into
//! `DomainError::OperationFailed` with the original cause kept for logs.

use chrono::{DateTime, Utc};
use tracing::error;

use crate::EntityId;
use crate::aggregate::Aggregate;
use crate::error::DomainError;
use crate::record::Record;
use crate::repository::Repository;

/// Loads the record with `id` or fails with `NotFound`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the store has no such record, or the
/// store error if the lookup fails.
pub async fn load_existing<T: Aggregate>(
    repo: &dyn Repository<T>,
    id: EntityId,
) -> Result<Record<T>, DomainError> {
    repo.find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: T::NAME,
            id,
        })
}

/// Persists a new aggregate; the store assigns identity and both timestamps.
///
/// # Errors
///
/// Returns `DomainError::OperationFailed` if the store rejects the insert.
pub async fn save_new<T: Aggregate>(
    repo: &dyn Repository<T>,
    fields: T,
    now: DateTime<Utc>,
) -> Result<Record<T>, DomainError> {
    repo.insert(fields, now)
        .await
        .map_err(|cause| wrap_failure("saving", T::NAME, &cause))
}

/// Persists a revision of an existing record.
///
/// # Errors
///
/// Returns `DomainError::OperationFailed` if the store rejects the update.
pub async fn save_revision<T: Aggregate>(
    repo: &dyn Repository<T>,
    record: &Record<T>,
) -> Result<Record<T>, DomainError> {
    repo.update(record)
        .await
        .map_err(|cause| wrap_failure("updating", T::NAME, &cause))
}

/// Deletes the record with `id` after confirming it exists.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the record does not exist, or
/// `DomainError::OperationFailed` if the store fails to delete it.
pub async fn remove_existing<T: Aggregate>(
    repo: &dyn Repository<T>,
    id: EntityId,
) -> Result<(), DomainError> {
    load_existing(repo, id).await?;
    repo.delete(id)
        .await
        .map_err(|cause| wrap_failure("deleting", T::NAME, &cause))
}

fn wrap_failure(action: &'static str, entity: &'static str, cause: &DomainError) -> DomainError {
    error!(action, entity, error = %cause, "store failure on write path");
    DomainError::operation_failed(action, entity, cause)
}
