//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use sabor_api::routes;
use sabor_api::state::{OrderState, RestaurantState, TableState, WaiterState};
use sabor_core::clock::Clock;
use sabor_core::record::EntityRef;
use sabor_core::repository::Repository;
use sabor_order::domain::aggregates::Order;
use sabor_restaurant::domain::aggregates::{Menu, MenuItem, Restaurant};
use sabor_table::domain::aggregates::Table;
use sabor_table::domain::references::ReferenceLookup;
use sabor_test_support::{FixedClock, InMemoryRepository, StubEntityClient, fixed_now};
use sabor_waiter::domain::aggregates::Waiter;
use serde_json::Value;
use tower::ServiceExt;

/// Fixed timestamp used across all integration tests.
pub const FIXED_NOW: &str = "2026-01-15T10:00:00Z";

fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(fixed_now()))
}

/// A peer service that knows exactly `ids`.
pub fn peer(ids: &[i64]) -> Arc<StubEntityClient<EntityRef>> {
    Arc::new(StubEntityClient::new(
        ids.iter().map(|&id| EntityRef { id }).collect(),
    ))
}

/// Restaurant service over in-memory stores.
#[derive(Default)]
pub struct RestaurantService {
    pub restaurants: Arc<InMemoryRepository<Restaurant>>,
    pub menus: Arc<InMemoryRepository<Menu>>,
    pub menu_items: Arc<InMemoryRepository<MenuItem>>,
}

impl RestaurantService {
    pub fn app(&self) -> Router {
        let restaurants: Arc<dyn Repository<Restaurant>> = self.restaurants.clone();
        let menus: Arc<dyn Repository<Menu>> = self.menus.clone();
        let menu_items: Arc<dyn Repository<MenuItem>> = self.menu_items.clone();
        routes::restaurant_app(RestaurantState::new(
            fixed_clock(),
            restaurants,
            menus,
            menu_items,
        ))
    }
}

/// Builds the table service router.
pub fn table_app(
    tables: Arc<dyn Repository<Table>>,
    restaurants: Arc<ReferenceLookup>,
    waiters: Arc<ReferenceLookup>,
) -> Router {
    routes::table_app(TableState {
        clock: fixed_clock(),
        tables,
        restaurants,
        waiters,
    })
}

/// Builds the waiter service router.
pub fn waiter_app(
    waiters: Arc<dyn Repository<Waiter>>,
    restaurants: Arc<ReferenceLookup>,
    tables: Arc<ReferenceLookup>,
) -> Router {
    routes::waiter_app(WaiterState {
        clock: fixed_clock(),
        waiters,
        restaurants,
        tables,
    })
}

/// The four peers an order is checked against.
pub struct OrderPeers {
    pub restaurants: Arc<StubEntityClient<EntityRef>>,
    pub tables: Arc<StubEntityClient<EntityRef>>,
    pub waiters: Arc<StubEntityClient<EntityRef>>,
    pub menu_items: Arc<StubEntityClient<EntityRef>>,
}

impl OrderPeers {
    /// Restaurant 7, table 3, waiter 9 and the given menu items exist.
    pub fn with_items(items: &[i64]) -> Self {
        Self {
            restaurants: peer(&[7]),
            tables: peer(&[3]),
            waiters: peer(&[9]),
            menu_items: peer(items),
        }
    }
}

/// Builds the order service router.
pub fn order_app(orders: Arc<dyn Repository<Order>>, peers: &OrderPeers) -> Router {
    routes::order_app(OrderState {
        clock: fixed_clock(),
        orders,
        restaurants: peers.restaurants.clone(),
        tables: peers.tables.clone(),
        waiters: peers.waiters.clone(),
        menu_items: peers.menu_items.clone(),
    })
}

/// Send a request and return the status with the decoded body. Empty bodies
/// decode to `Value::Null`; non-JSON bodies to `Value::String`.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<&Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body_bytes).into_owned()))
    };

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

/// Send a PUT request with a JSON body and return the response.
pub async fn put_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

/// Send a DELETE request and return the status.
pub async fn delete(app: Router, uri: &str) -> StatusCode {
    send(app, Method::DELETE, uri, None).await.0
}
