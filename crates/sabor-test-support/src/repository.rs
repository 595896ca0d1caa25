//! Test repositories: `Repository` implementations for tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sabor_core::EntityId;
use sabor_core::IdSet;
use sabor_core::aggregate::Aggregate;
use sabor_core::error::DomainError;
use sabor_core::record::Record;
use sabor_core::repository::{Page, PageRequest, Repository, ScanScope};

#[derive(Debug)]
struct State<T> {
    next_id: EntityId,
    rows: BTreeMap<EntityId, Record<T>>,
}

/// A repository backed by an in-process map. Identities are assigned from a
/// counter starting at 1 (or after the highest seeded identity).
///
/// Writes can be switched to fail, which lets tests reach the "store failed
/// after the record was found" paths.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    state: Mutex<State<T>>,
    fail_writes: bool,
}

impl<T: Aggregate> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Aggregate> InMemoryRepository<T> {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Creates a repository pre-populated with `records`.
    #[must_use]
    pub fn with_records(records: Vec<Record<T>>) -> Self {
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(State {
                next_id,
                rows: records.into_iter().map(|r| (r.id, r)).collect(),
            }),
            fail_writes: false,
        }
    }

    /// Makes `insert`, `update` and `delete` fail with an infrastructure
    /// error while reads keep working.
    #[must_use]
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Returns a snapshot of every stored record, in identity order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn records(&self) -> Vec<Record<T>> {
        self.state.lock().unwrap().rows.values().cloned().collect()
    }

    /// Returns the stored record with `id`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn get(&self, id: EntityId) -> Option<Record<T>> {
        self.state.lock().unwrap().rows.get(&id).cloned()
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes {
            Err(DomainError::Infrastructure("disk full".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl<T: Aggregate> Repository<T> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Record<T>>, DomainError> {
        Ok(self.get(id))
    }

    async fn find_by_ids(&self, ids: &IdSet) -> Result<Vec<Record<T>>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| state.rows.get(id).cloned())
            .collect())
    }

    async fn find_page(
        &self,
        scope: ScanScope,
        request: PageRequest,
    ) -> Result<Page<Record<T>>, DomainError> {
        let state = self.state.lock().unwrap();
        let matching: Vec<&Record<T>> = state
            .rows
            .values()
            .filter(|r| scope.admits(&r.fields))
            .collect();
        let total = matching.len() as u64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let content = matching
            .into_iter()
            .skip(offset)
            .take(request.size as usize)
            .cloned()
            .collect();
        Ok(Page::new(content, request, total))
    }

    async fn insert(&self, fields: T, now: DateTime<Utc>) -> Result<Record<T>, DomainError> {
        self.check_writable()?;
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        let record = Record::new(id, fields, now);
        state.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, record: &Record<T>) -> Result<Record<T>, DomainError> {
        self.check_writable()?;
        let mut state = self.state.lock().unwrap();
        let Some(existing) = state.rows.get_mut(&record.id) else {
            return Err(DomainError::NotFound {
                entity: T::NAME,
                id: record.id,
            });
        };
        let stored = Record {
            id: existing.id,
            created_at: existing.created_at,
            updated_at: record.updated_at,
            fields: record.fields.clone(),
        };
        *existing = stored.clone();
        Ok(stored)
    }

    async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        self.check_writable()?;
        self.state.lock().unwrap().rows.remove(&id);
        Ok(())
    }
}

/// A repository that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingRepository;

#[async_trait]
impl<T: Aggregate> Repository<T> for FailingRepository {
    async fn find_by_id(&self, _id: EntityId) -> Result<Option<Record<T>>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn find_by_ids(&self, _ids: &IdSet) -> Result<Vec<Record<T>>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn find_page(
        &self,
        _scope: ScanScope,
        _request: PageRequest,
    ) -> Result<Page<Record<T>>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn insert(&self, _fields: T, _now: DateTime<Utc>) -> Result<Record<T>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn update(&self, _record: &Record<T>) -> Result<Record<T>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn delete(&self, _id: EntityId) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed_now;

    #[derive(Debug, Clone, PartialEq)]
    struct Shelf {
        store_id: EntityId,
    }

    impl Aggregate for Shelf {
        const NAME: &'static str = "shelf";

        fn parent_id(&self) -> Option<EntityId> {
            Some(self.store_id)
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryRepository::new();

        let first = repo.insert(Shelf { store_id: 1 }, fixed_now()).await.unwrap();
        let second = repo.insert(Shelf { store_id: 1 }, fixed_now()).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_find_page_filters_by_parent_scope() {
        let repo = InMemoryRepository::new();
        for store_id in [1, 2, 1, 1] {
            repo.insert(Shelf { store_id }, fixed_now()).await.unwrap();
        }

        let page = repo
            .find_page(ScanScope::Parent(1), PageRequest::new(1, 2))
            .await
            .unwrap();

        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].id, 4);
    }

    #[tokio::test]
    async fn test_failing_writes_still_allow_reads() {
        let seeded = Record::new(5, Shelf { store_id: 1 }, fixed_now());
        let repo = InMemoryRepository::with_records(vec![seeded]).failing_writes();

        assert!(repo.find_by_id(5).await.unwrap().is_some());
        assert!(repo.delete(5).await.is_err());
    }
}
