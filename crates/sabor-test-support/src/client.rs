//! Test clients: `RemoteEntityClient` implementations for tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use sabor_core::client::{LookupError, RemoteEntityClient};
use sabor_core::record::Identified;
use sabor_core::{EntityId, IdSet};

/// A client over a fixed set of entities that records every call it gets.
#[derive(Debug)]
pub struct StubEntityClient<E> {
    entities: BTreeMap<EntityId, E>,
    calls: Mutex<Vec<String>>,
}

impl<E: Identified + Clone + Send + Sync + 'static> StubEntityClient<E> {
    /// Creates a client that knows exactly `entities`.
    #[must_use]
    pub fn new(entities: Vec<E>) -> Self {
        Self {
            entities: entities.into_iter().map(|e| (e.id(), e)).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Creates a client that knows no entity at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Returns every call made so far, e.g. `"get_by_id(7)"` or
    /// `"get_by_ids({1, 2})"`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl<E: Identified + Clone + Send + Sync + 'static> RemoteEntityClient for StubEntityClient<E> {
    type Entity = E;

    async fn get_by_id(&self, id: EntityId) -> Result<Option<E>, LookupError> {
        self.calls.lock().unwrap().push(format!("get_by_id({id})"));
        Ok(self.entities.get(&id).cloned())
    }

    async fn get_by_ids(&self, ids: &IdSet) -> Result<Vec<E>, LookupError> {
        self.calls.lock().unwrap().push(format!("get_by_ids({ids:?})"));
        Ok(ids
            .iter()
            .filter_map(|id| self.entities.get(id).cloned())
            .collect())
    }
}

/// A client whose every lookup fails as if the owning service were down.
#[derive(Debug)]
pub struct FailingEntityClient<E> {
    _entity: std::marker::PhantomData<fn() -> E>,
}

impl<E> FailingEntityClient<E> {
    /// Creates the client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _entity: std::marker::PhantomData,
        }
    }
}

impl<E> Default for FailingEntityClient<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Send + 'static> RemoteEntityClient for FailingEntityClient<E> {
    type Entity = E;

    async fn get_by_id(&self, _id: EntityId) -> Result<Option<E>, LookupError> {
        Err(LookupError::new("remote", "connection refused"))
    }

    async fn get_by_ids(&self, _ids: &IdSet) -> Result<Vec<E>, LookupError> {
        Err(LookupError::new("remote", "connection refused"))
    }
}
