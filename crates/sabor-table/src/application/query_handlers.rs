//! Query handlers for the Table context.

use sabor_core::error::DomainError;
use sabor_core::reconciler::find_all_by_ids;
use sabor_core::record::Record;
use sabor_core::repository::{Page, PageRequest, Repository, ScanScope};
use sabor_core::service::load_existing;
use sabor_core::{EntityId, IdSet};

use crate::domain::aggregates::Table;

/// Retrieves a table by identifier.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no table has the identifier.
pub async fn get_table_by_id(
    table_id: EntityId,
    repo: &dyn Repository<Table>,
) -> Result<Record<Table>, DomainError> {
    load_existing(repo, table_id).await
}

/// Lists every table one page at a time.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store scan fails.
pub async fn list_tables(
    request: PageRequest,
    repo: &dyn Repository<Table>,
) -> Result<Page<Record<Table>>, DomainError> {
    repo.find_page(ScanScope::All, request).await
}

/// Lists the tables of one restaurant.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store scan fails.
pub async fn list_tables_by_restaurant(
    restaurant_id: EntityId,
    request: PageRequest,
    repo: &dyn Repository<Table>,
) -> Result<Page<Record<Table>>, DomainError> {
    repo.find_page(ScanScope::Parent(restaurant_id), request)
        .await
}

/// Retrieves exactly the tables named by `ids`.
///
/// # Errors
///
/// Returns `DomainError::IncompleteBatch` naming the identifiers that do not
/// exist.
pub async fn find_tables_by_ids(
    ids: &IdSet,
    repo: &dyn Repository<Table>,
) -> Result<Vec<Record<Table>>, DomainError> {
    find_all_by_ids(repo, ids).await
}

#[cfg(test)]
mod tests {
    use sabor_test_support::{InMemoryRepository, fixed_now};

    use super::*;

    fn stored(id: EntityId, restaurant_id: EntityId) -> Record<Table> {
        Record::new(
            id,
            Table {
                restaurant_id,
                table_identifier: format!("T{id}"),
                waiters_id: IdSet::new(),
            },
            fixed_now(),
        )
    }

    #[tokio::test]
    async fn test_find_tables_by_ids_fails_when_one_is_missing() {
        // Arrange
        let repo = InMemoryRepository::with_records(vec![stored(1, 7), stored(3, 7)]);

        // Act
        let result = find_tables_by_ids(&IdSet::from([1, 2, 3]), &repo).await;

        // Assert
        match result {
            Err(DomainError::IncompleteBatch { entity, missing }) => {
                assert_eq!(entity, "table");
                assert_eq!(missing, vec![2]);
            }
            other => panic!("expected IncompleteBatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_find_tables_by_empty_ids_is_empty() {
        let repo = InMemoryRepository::with_records(vec![stored(1, 7)]);

        let found = find_tables_by_ids(&IdSet::new(), &repo).await.unwrap();

        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_list_tables_by_restaurant_pages_in_identity_order() {
        // Arrange
        let repo = InMemoryRepository::with_records(vec![
            stored(1, 7),
            stored(2, 8),
            stored(3, 7),
            stored(4, 7),
        ]);

        // Act
        let page = list_tables_by_restaurant(7, PageRequest::new(0, 2), &repo)
            .await
            .unwrap();

        // Assert
        let ids: Vec<EntityId> = page.content.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn test_get_unknown_table_is_not_found() {
        let repo = InMemoryRepository::<Table>::new();

        let result = get_table_by_id(1, &repo).await;

        assert!(matches!(result, Err(DomainError::NotFound { id: 1, .. })));
    }
}
