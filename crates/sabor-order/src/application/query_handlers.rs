//! Query handlers for the Order context.

use sabor_core::EntityId;
use sabor_core::error::DomainError;
use sabor_core::record::Record;
use sabor_core::repository::{Page, PageRequest, Repository, ScanScope};
use sabor_core::service::load_existing;

use crate::domain::aggregates::Order;

/// Retrieves an order by identifier.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no order has the identifier.
pub async fn get_order_by_id(
    order_id: EntityId,
    repo: &dyn Repository<Order>,
) -> Result<Record<Order>, DomainError> {
    load_existing(repo, order_id).await
}

/// Lists every order one page at a time.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store scan fails.
pub async fn list_orders(
    request: PageRequest,
    repo: &dyn Repository<Order>,
) -> Result<Page<Record<Order>>, DomainError> {
    repo.find_page(ScanScope::All, request).await
}

/// Lists the orders placed at one restaurant.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store scan fails.
pub async fn list_orders_by_restaurant(
    restaurant_id: EntityId,
    request: PageRequest,
    repo: &dyn Repository<Order>,
) -> Result<Page<Record<Order>>, DomainError> {
    repo.find_page(ScanScope::Parent(restaurant_id), request)
        .await
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use sabor_test_support::{FailingRepository, InMemoryRepository, fixed_now};

    use super::*;
    use crate::domain::aggregates::{OrderStatus, OrderType, PaymentType};

    fn stored(id: EntityId, restaurant_id: EntityId) -> Record<Order> {
        Record::new(
            id,
            Order {
                restaurant_id,
                table_id: 1,
                waiter_id: 1,
                items_id: Vec::new(),
                price: Decimal::new(2500, 2),
                order_type: OrderType::Takeaway,
                payment_type: PaymentType::Cash,
                order_status: OrderStatus::Pending,
            },
            fixed_now(),
        )
    }

    #[tokio::test]
    async fn test_list_orders_by_restaurant_reports_totals() {
        // Arrange
        let records = (1..=12).map(|id| stored(id, 7)).chain([stored(13, 8)]);
        let repo = InMemoryRepository::with_records(records.collect());

        // Act
        let page = list_orders_by_restaurant(7, PageRequest::new(1, 10), &repo)
            .await
            .unwrap();

        // Assert
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_elements, 12);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.page, 1);
    }

    #[tokio::test]
    async fn test_get_order_by_id_propagates_store_failure() {
        let result = get_order_by_id(1, &FailingRepository).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[tokio::test]
    async fn test_list_orders_returns_everything_in_scope() {
        let repo = InMemoryRepository::with_records(vec![stored(1, 7), stored(2, 8)]);

        let page = list_orders(PageRequest::default(), &repo).await.unwrap();

        assert_eq!(page.total_elements, 2);
    }
}
