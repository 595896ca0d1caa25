//! Shared application state, one shape per service.

use std::sync::Arc;

use sabor_core::client::RepositoryClient;
use sabor_core::clock::Clock;
use sabor_core::repository::Repository;
use sabor_order::domain::aggregates::Order;
use sabor_order::domain::references::OrderReferences;
use sabor_restaurant::application::command_handlers::{MenuLookup, RestaurantLookup};
use sabor_restaurant::domain::aggregates::{Menu, MenuItem, Restaurant};
use sabor_table::domain::aggregates::Table;
use sabor_table::domain::references::{ReferenceLookup, TableReferences};
use sabor_waiter::domain::aggregates::Waiter;
use sabor_waiter::domain::references::WaiterReferences;

/// State of the restaurant service.
#[derive(Clone)]
pub struct RestaurantState {
    /// Clock for record timestamps.
    pub clock: Arc<dyn Clock>,
    /// Restaurant store.
    pub restaurants: Arc<dyn Repository<Restaurant>>,
    /// Menu store.
    pub menus: Arc<dyn Repository<Menu>>,
    /// Menu item store.
    pub menu_items: Arc<dyn Repository<MenuItem>>,
    restaurant_lookup: Arc<RestaurantLookup>,
    menu_lookup: Arc<MenuLookup>,
}

impl RestaurantState {
    /// Create new restaurant service state. Menus and menu items check
    /// their parents through the local stores.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        restaurants: Arc<dyn Repository<Restaurant>>,
        menus: Arc<dyn Repository<Menu>>,
        menu_items: Arc<dyn Repository<MenuItem>>,
    ) -> Self {
        Self {
            restaurant_lookup: Arc::new(RepositoryClient::new(Arc::clone(&restaurants))),
            menu_lookup: Arc::new(RepositoryClient::new(Arc::clone(&menus))),
            clock,
            restaurants,
            menus,
            menu_items,
        }
    }

    /// Parent check for menus.
    #[must_use]
    pub fn restaurant_lookup(&self) -> &RestaurantLookup {
        &*self.restaurant_lookup
    }

    /// Parent check for menu items.
    #[must_use]
    pub fn menu_lookup(&self) -> &MenuLookup {
        &*self.menu_lookup
    }
}

/// State of the table service.
#[derive(Clone)]
pub struct TableState {
    /// Clock for record timestamps.
    pub clock: Arc<dyn Clock>,
    /// Table store.
    pub tables: Arc<dyn Repository<Table>>,
    /// Restaurant service client.
    pub restaurants: Arc<ReferenceLookup>,
    /// Waiter service client.
    pub waiters: Arc<ReferenceLookup>,
}

impl TableState {
    /// The peers a table is checked against.
    #[must_use]
    pub fn references(&self) -> TableReferences<'_> {
        TableReferences {
            restaurants: &*self.restaurants,
            waiters: &*self.waiters,
        }
    }
}

/// State of the waiter service.
#[derive(Clone)]
pub struct WaiterState {
    /// Clock for record timestamps.
    pub clock: Arc<dyn Clock>,
    /// Waiter store.
    pub waiters: Arc<dyn Repository<Waiter>>,
    /// Restaurant service client.
    pub restaurants: Arc<ReferenceLookup>,
    /// Table service client.
    pub tables: Arc<ReferenceLookup>,
}

impl WaiterState {
    /// The peers a waiter is checked against.
    #[must_use]
    pub fn references(&self) -> WaiterReferences<'_> {
        WaiterReferences {
            restaurants: &*self.restaurants,
            tables: &*self.tables,
        }
    }
}

/// State of the order service.
#[derive(Clone)]
pub struct OrderState {
    /// Clock for record timestamps.
    pub clock: Arc<dyn Clock>,
    /// Order store.
    pub orders: Arc<dyn Repository<Order>>,
    /// Restaurant service client.
    pub restaurants: Arc<ReferenceLookup>,
    /// Table service client.
    pub tables: Arc<ReferenceLookup>,
    /// Waiter service client.
    pub waiters: Arc<ReferenceLookup>,
    /// Menu item client (restaurant service).
    pub menu_items: Arc<ReferenceLookup>,
}

impl OrderState {
    /// The peers an order is checked against.
    #[must_use]
    pub fn references(&self) -> OrderReferences<'_> {
        OrderReferences {
            restaurants: &*self.restaurants,
            tables: &*self.tables,
            waiters: &*self.waiters,
            menu_items: &*self.menu_items,
        }
    }
}
