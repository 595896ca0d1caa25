//! Wires the configured service onto `PostgreSQL` stores and HTTP peers.

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use reqwest::Client;
use sabor_core::clock::{Clock, SystemClock};
use sabor_core::record::EntityRef;
use sabor_order::domain::aggregates::Order;
use sabor_remote::HttpEntityClient;
use sabor_restaurant::domain::aggregates::{Menu, MenuItem, Restaurant};
use sabor_store::PgRepository;
use sabor_table::domain::aggregates::Table;
use sabor_table::domain::references::ReferenceLookup;
use sabor_waiter::domain::aggregates::Waiter;
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::ServiceConfig;
use crate::error::AppError;
use crate::routes;
use crate::state::{OrderState, RestaurantState, TableState, WaiterState};

fn peer(
    http: &Client,
    base_url: &str,
    resource: &'static str,
    entity: &'static str,
) -> Arc<ReferenceLookup> {
    Arc::new(HttpEntityClient::<EntityRef>::new(
        http.clone(),
        base_url,
        resource,
        entity,
    ))
}

/// Builds the router of the configured service.
pub fn build_router(service: &ServiceConfig, pool: &PgPool, http: &Client) -> Router {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    match service {
        ServiceConfig::Restaurant => routes::restaurant_app(RestaurantState::new(
            clock,
            Arc::new(PgRepository::<Restaurant>::new(pool.clone())),
            Arc::new(PgRepository::<Menu>::new(pool.clone())),
            Arc::new(PgRepository::<MenuItem>::new(pool.clone())),
        )),
        ServiceConfig::Table {
            restaurant_url,
            waiter_url,
        } => routes::table_app(TableState {
            clock,
            tables: Arc::new(PgRepository::<Table>::new(pool.clone())),
            restaurants: peer(http, restaurant_url, "/api/restaurants", "restaurant"),
            waiters: peer(http, waiter_url, "/api/waiters", "waiter"),
        }),
        ServiceConfig::Waiter {
            restaurant_url,
            table_url,
        } => routes::waiter_app(WaiterState {
            clock,
            waiters: Arc::new(PgRepository::<Waiter>::new(pool.clone())),
            restaurants: peer(http, restaurant_url, "/api/restaurants", "restaurant"),
            tables: peer(http, table_url, "/api/tables", "table"),
        }),
        ServiceConfig::Order {
            restaurant_url,
            table_url,
            waiter_url,
        } => routes::order_app(OrderState {
            clock,
            orders: Arc::new(PgRepository::<Order>::new(pool.clone())),
            restaurants: peer(http, restaurant_url, "/api/restaurants", "restaurant"),
            tables: peer(http, table_url, "/api/tables", "table"),
            waiters: peer(http, waiter_url, "/api/waiters", "waiter"),
            menu_items: peer(http, restaurant_url, "/api/menu-items", "menu item"),
        }),
    }
}

/// CORS for the configured origins, or any origin when none are listed.
///
/// # Errors
///
/// Returns `AppError::Config` if an origin is not a valid header value.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, AppError> {
    if origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|e| AppError::Config(format!("invalid CORS origin {origin:?}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}
