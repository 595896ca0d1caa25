//! Query handlers for the Waiter context.

use sabor_core::error::DomainError;
use sabor_core::reconciler::find_all_by_ids;
use sabor_core::record::Record;
use sabor_core::repository::{Page, PageRequest, Repository, ScanScope};
use sabor_core::service::load_existing;
use sabor_core::{EntityId, IdSet};

use crate::domain::aggregates::Waiter;

/// Retrieves a waiter by identifier.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no waiter has the identifier.
pub async fn get_waiter_by_id(
    waiter_id: EntityId,
    repo: &dyn Repository<Waiter>,
) -> Result<Record<Waiter>, DomainError> {
    load_existing(repo, waiter_id).await
}

/// Lists every waiter one page at a time.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store scan fails.
pub async fn list_waiters(
    request: PageRequest,
    repo: &dyn Repository<Waiter>,
) -> Result<Page<Record<Waiter>>, DomainError> {
    repo.find_page(ScanScope::All, request).await
}

/// Lists the waiters of one restaurant.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store scan fails.
pub async fn list_waiters_by_restaurant(
    restaurant_id: EntityId,
    request: PageRequest,
    repo: &dyn Repository<Waiter>,
) -> Result<Page<Record<Waiter>>, DomainError> {
    repo.find_page(ScanScope::Parent(restaurant_id), request)
        .await
}

/// Retrieves exactly the waiters named by `ids`.
///
/// # Errors
///
/// Returns `DomainError::IncompleteBatch` naming the identifiers that do not
/// exist.
pub async fn find_waiters_by_ids(
    ids: &IdSet,
    repo: &dyn Repository<Waiter>,
) -> Result<Vec<Record<Waiter>>, DomainError> {
    find_all_by_ids(repo, ids).await
}
