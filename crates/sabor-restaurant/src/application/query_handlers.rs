//! Query handlers for the Restaurant context.

use sabor_core::error::DomainError;
use sabor_core::reconciler::find_all_by_ids;
use sabor_core::record::Record;
use sabor_core::repository::{Page, PageRequest, Repository, ScanScope};
use sabor_core::service::load_existing;
use sabor_core::{EntityId, IdSet};

use crate::domain::aggregates::{Menu, MenuItem, Restaurant};

/// Retrieves a restaurant by identifier.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no restaurant has the identifier.
pub async fn get_restaurant_by_id(
    restaurant_id: EntityId,
    repo: &dyn Repository<Restaurant>,
) -> Result<Record<Restaurant>, DomainError> {
    load_existing(repo, restaurant_id).await
}

/// Lists restaurants one page at a time.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store scan fails.
pub async fn list_restaurants(
    request: PageRequest,
    repo: &dyn Repository<Restaurant>,
) -> Result<Page<Record<Restaurant>>, DomainError> {
    repo.find_page(ScanScope::All, request).await
}

/// Retrieves a menu by identifier.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no menu has the identifier.
pub async fn get_menu_by_id(
    menu_id: EntityId,
    repo: &dyn Repository<Menu>,
) -> Result<Record<Menu>, DomainError> {
    load_existing(repo, menu_id).await
}

/// Lists all menus one page at a time.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store scan fails.
pub async fn list_menus(
    request: PageRequest,
    repo: &dyn Repository<Menu>,
) -> Result<Page<Record<Menu>>, DomainError> {
    repo.find_page(ScanScope::All, request).await
}

/// Lists the menus of one restaurant.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store scan fails.
pub async fn list_menus_by_restaurant(
    restaurant_id: EntityId,
    request: PageRequest,
    repo: &dyn Repository<Menu>,
) -> Result<Page<Record<Menu>>, DomainError> {
    repo.find_page(ScanScope::Parent(restaurant_id), request)
        .await
}

/// Retrieves a menu item by identifier.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no item has the identifier.
pub async fn get_menu_item_by_id(
    menu_item_id: EntityId,
    repo: &dyn Repository<MenuItem>,
) -> Result<Record<MenuItem>, DomainError> {
    load_existing(repo, menu_item_id).await
}

/// Lists all menu items one page at a time.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store scan fails.
pub async fn list_menu_items(
    request: PageRequest,
    repo: &dyn Repository<MenuItem>,
) -> Result<Page<Record<MenuItem>>, DomainError> {
    repo.find_page(ScanScope::All, request).await
}

/// Lists the items on one menu.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store scan fails.
pub async fn list_menu_items_by_menu(
    menu_id: EntityId,
    request: PageRequest,
    repo: &dyn Repository<MenuItem>,
) -> Result<Page<Record<MenuItem>>, DomainError> {
    repo.find_page(ScanScope::Parent(menu_id), request).await
}

/// Retrieves exactly the menu items named by `ids`.
///
/// Other services call this to verify the items an order lists.
///
/// # Errors
///
/// Returns `DomainError::IncompleteBatch` naming the identifiers that do not
/// exist.
pub async fn find_menu_items_by_ids(
    ids: &IdSet,
    repo: &dyn Repository<MenuItem>,
) -> Result<Vec<Record<MenuItem>>, DomainError> {
    find_all_by_ids(repo, ids).await
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use sabor_test_support::{FailingRepository, InMemoryRepository, fixed_now};

    use super::*;

    fn item(id: EntityId, menu_id: EntityId) -> Record<MenuItem> {
        Record::new(
            id,
            MenuItem {
                menu_id,
                name: format!("item {id}"),
                price: Decimal::from_str("9.90").unwrap(),
                preparation_time: 5,
            },
            fixed_now(),
        )
    }

    #[tokio::test]
    async fn test_get_restaurant_by_id_twice_returns_identical_records() {
        // Arrange
        let stored = Record::new(
            1,
            Restaurant {
                name: "Casa Sabor".to_owned(),
                address: "Rua Augusta 1200".to_owned(),
                phone: "1133334444".to_owned(),
                website: None,
                logo: None,
            },
            fixed_now(),
        );
        let repo = InMemoryRepository::with_records(vec![stored.clone()]);

        // Act
        let first = get_restaurant_by_id(1, &repo).await.unwrap();
        let second = get_restaurant_by_id(1, &repo).await.unwrap();

        // Assert
        assert_eq!(first, stored);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_find_menu_items_by_ids_returns_every_requested_item() {
        let repo = InMemoryRepository::with_records(vec![item(1, 1), item(2, 1), item(3, 2)]);
        let ids = IdSet::from([1, 3]);

        let found = find_menu_items_by_ids(&ids, &repo).await.unwrap();

        let found_ids: Vec<EntityId> = found.iter().map(|r| r.id).collect();
        assert_eq!(found_ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_find_menu_items_by_ids_names_missing_identifier() {
        // Arrange
        let repo = InMemoryRepository::with_records(vec![item(1, 1), item(3, 1)]);
        let ids = IdSet::from([1, 2, 3]);

        // Act
        let result = find_menu_items_by_ids(&ids, &repo).await;

        // Assert
        match result {
            Err(DomainError::IncompleteBatch { entity, missing }) => {
                assert_eq!(entity, "menu item");
                assert_eq!(missing, vec![2]);
            }
            other => panic!("expected IncompleteBatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_menu_items_by_menu_scopes_to_menu() {
        let repo = InMemoryRepository::with_records(vec![item(1, 1), item(2, 2), item(3, 2)]);

        let page = list_menu_items_by_menu(2, PageRequest::default(), &repo)
            .await
            .unwrap();

        assert_eq!(page.total_elements, 2);
        assert!(page.content.iter().all(|r| r.fields.menu_id == 2));
    }

    #[tokio::test]
    async fn test_list_menus_propagates_store_failure() {
        let result = list_menus(PageRequest::default(), &FailingRepository).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }
}
