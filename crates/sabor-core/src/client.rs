//! Remote entity client abstraction.
//!
//! A remote entity client is the only way a service reads an entity owned by
//! another service (or by a sibling aggregate in the same service). Clients
//! never mutate the entities they read.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::aggregate::Aggregate;
use crate::record::Record;
use crate::repository::Repository;
use crate::{EntityId, IdSet};

/// A lookup could not be answered: transport failure, timeout, unexpected
/// status or an undecodable body. Distinct from "the entity is absent".
#[derive(Debug, Clone, Error)]
#[error("lookup of {entity} failed: {reason}")]
pub struct LookupError {
    /// Name of the entity being looked up.
    pub entity: &'static str,
    /// Human-readable failure description.
    pub reason: String,
}

impl LookupError {
    /// Creates a lookup error for `entity`.
    pub fn new(entity: &'static str, reason: impl Into<String>) -> Self {
        Self {
            entity,
            reason: reason.into(),
        }
    }
}

/// Typed read accessor for a foreign entity store.
///
/// Each call is one round trip to the owning service.
#[async_trait]
pub trait RemoteEntityClient: Send + Sync {
    /// The foreign entity view this client returns.
    type Entity: Send + 'static;

    /// Looks up one entity. `Ok(None)` means the owner does not have it.
    async fn get_by_id(&self, id: EntityId) -> Result<Option<Self::Entity>, LookupError>;

    /// Looks up a set of entities, returning only those that exist. Never
    /// fails solely because some identifiers are unknown.
    async fn get_by_ids(&self, ids: &IdSet) -> Result<Vec<Self::Entity>, LookupError>;
}

/// Client over a repository in the same process, used when a foreign key
/// points at a sibling aggregate owned by the same service.
pub struct RepositoryClient<T: Aggregate> {
    repository: Arc<dyn Repository<T>>,
}

impl<T: Aggregate> RepositoryClient<T> {
    /// Wraps `repository` as a read-only client.
    #[must_use]
    pub fn new(repository: Arc<dyn Repository<T>>) -> Self {
        Self { repository }
    }
}

impl<T: Aggregate> std::fmt::Debug for RepositoryClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryClient")
            .field("entity", &T::NAME)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<T: Aggregate> RemoteEntityClient for RepositoryClient<T> {
    type Entity = Record<T>;

    async fn get_by_id(&self, id: EntityId) -> Result<Option<Record<T>>, LookupError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|e| LookupError::new(T::NAME, e.to_string()))
    }

    async fn get_by_ids(&self, ids: &IdSet) -> Result<Vec<Record<T>>, LookupError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.repository
            .find_by_ids(ids)
            .await
            .map_err(|e| LookupError::new(T::NAME, e.to_string()))
    }
}
