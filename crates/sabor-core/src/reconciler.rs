//! Batch reconciliation after a lookup by identifier set.

use tracing::debug;

use crate::aggregate::Aggregate;
use crate::error::DomainError;
use crate::record::{Identified, Record};
use crate::repository::Repository;
use crate::{EntityId, IdSet};

/// Checks that `found` covers every identifier in `requested`.
///
/// Returns exactly the entries of `found` whose identity was requested, in
/// the order the store produced them. An empty request reconciles to an
/// empty result.
///
/// # Errors
///
/// Returns `DomainError::IncompleteBatch` listing the missing identifiers,
/// ascending, when any requested identifier is absent. No partial data is
/// returned in that case.
pub fn reconcile<R: Identified>(
    entity: &'static str,
    requested: &IdSet,
    found: Vec<R>,
) -> Result<Vec<R>, DomainError> {
    if requested.is_empty() {
        return Ok(Vec::new());
    }

    let found: Vec<R> = found
        .into_iter()
        .filter(|r| requested.contains(&r.id()))
        .collect();
    let found_ids: IdSet = found.iter().map(Identified::id).collect();
    let missing: Vec<EntityId> = requested.difference(&found_ids).copied().collect();

    if !missing.is_empty() {
        debug!(entity, ?missing, "batch lookup incomplete");
        return Err(DomainError::IncompleteBatch { entity, missing });
    }
    Ok(found)
}

/// Looks up `ids` in `repo` and reconciles the result.
///
/// # Errors
///
/// Returns `DomainError::IncompleteBatch` if any identifier is missing, or
/// the repository error if the lookup fails.
pub async fn find_all_by_ids<T: Aggregate>(
    repo: &dyn Repository<T>,
    ids: &IdSet,
) -> Result<Vec<Record<T>>, DomainError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let found = repo.find_by_ids(ids).await?;
    reconcile(T::NAME, ids, found)
}
