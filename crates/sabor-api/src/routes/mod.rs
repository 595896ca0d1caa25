//! Route modules, and the full router of each service.

use axum::Router;

use crate::state::{OrderState, RestaurantState, TableState, WaiterState};

pub mod health;
pub mod menu_items;
pub mod menus;
pub mod orders;
pub mod restaurants;
pub mod tables;
pub mod waiters;

/// Restaurant service: restaurants, menus and menu items.
pub fn restaurant_app(state: RestaurantState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api/restaurants", restaurants::router())
        .nest("/api/menus", menus::router())
        .nest("/api/menu-items", menu_items::router())
        .with_state(state)
}

/// Table service.
pub fn table_app(state: TableState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api/tables", tables::router())
        .with_state(state)
}

/// Waiter service.
pub fn waiter_app(state: WaiterState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api/waiters", waiters::router())
        .with_state(state)
}

/// Order service.
pub fn order_app(state: OrderState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api/orders", orders::router())
        .with_state(state)
}
