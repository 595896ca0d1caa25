//! Routes for the Order bounded context.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use sabor_core::EntityId;
use sabor_core::record::Record;
use sabor_core::repository::Page;
use sabor_order::application::{command_handlers, query_handlers};
use sabor_order::domain::aggregates::Order;
use sabor_order::domain::commands;
use tracing::instrument;

use crate::context::RequestContext;
use crate::error::ApiError;
use crate::query::PageParams;
use crate::state::OrderState;

/// GET /
async fn list_orders(
    State(state): State<OrderState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Record<Order>>>, ApiError> {
    let page = query_handlers::list_orders(params.into_request(), &*state.orders).await?;
    Ok(Json(page))
}

/// GET /all-by-restaurant/{id}
#[instrument(skip(state, params))]
async fn list_orders_by_restaurant(
    State(state): State<OrderState>,
    Path(restaurant_id): Path<EntityId>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Record<Order>>>, ApiError> {
    let page =
        query_handlers::list_orders_by_restaurant(restaurant_id, params.into_request(), &*state.orders)
            .await?;
    Ok(Json(page))
}

/// POST /
#[instrument(
    skip_all,
    fields(
        correlation_id = %ctx.correlation_id,
        restaurant_id = input.restaurant_id,
        items = input.items_id.len(),
    )
)]
async fn create_order(
    State(state): State<OrderState>,
    ctx: RequestContext,
    Json(input): Json<Order>,
) -> Result<(StatusCode, Json<Record<Order>>), ApiError> {
    let command = commands::CreateOrder {
        correlation_id: ctx.correlation_id,
        input,
    };
    let record = command_handlers::handle_create_order(
        &command,
        state.clock.as_ref(),
        &*state.orders,
        state.references(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /{id}
async fn get_order(
    State(state): State<OrderState>,
    Path(order_id): Path<EntityId>,
) -> Result<Json<Record<Order>>, ApiError> {
    Ok(Json(query_handlers::get_order_by_id(order_id, &*state.orders).await?))
}

/// PUT /{id}
#[instrument(skip(state, ctx, input), fields(correlation_id = %ctx.correlation_id))]
async fn update_order(
    State(state): State<OrderState>,
    ctx: RequestContext,
    Path(order_id): Path<EntityId>,
    Json(input): Json<Order>,
) -> Result<Json<Record<Order>>, ApiError> {
    let command = commands::UpdateOrder {
        correlation_id: ctx.correlation_id,
        order_id,
        input,
    };
    let record = command_handlers::handle_update_order(
        &command,
        state.clock.as_ref(),
        &*state.orders,
        state.references(),
    )
    .await?;
    Ok(Json(record))
}

/// DELETE /{id}
#[instrument(skip(state, ctx), fields(correlation_id = %ctx.correlation_id))]
async fn delete_order(
    State(state): State<OrderState>,
    ctx: RequestContext,
    Path(order_id): Path<EntityId>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteOrder {
        correlation_id: ctx.correlation_id,
        order_id,
    };
    command_handlers::handle_delete_order(&command, &*state.orders).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Returns the router for the order context.
pub fn router() -> Router<OrderState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/all-by-restaurant/{id}", get(list_orders_by_restaurant))
        .route(
            "/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
}
