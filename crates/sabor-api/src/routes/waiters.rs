//! Routes for the Waiter bounded context.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use sabor_core::EntityId;
use sabor_core::record::Record;
use sabor_core::repository::Page;
use sabor_waiter::application::{command_handlers, query_handlers};
use sabor_waiter::domain::aggregates::Waiter;
use sabor_waiter::domain::commands;
use tracing::instrument;

use crate::context::RequestContext;
use crate::error::ApiError;
use crate::query::{IdsQuery, PageParams};
use crate::state::WaiterState;

async fn list_waiters(
    State(state): State<WaiterState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Record<Waiter>>>, ApiError> {
    let page = query_handlers::list_waiters(params.into_request(), &*state.waiters).await?;
    Ok(Json(page))
}

#[instrument(skip(state, params))]
async fn list_waiters_by_restaurant(
    State(state): State<WaiterState>,
    Path(restaurant_id): Path<EntityId>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Record<Waiter>>>, ApiError> {
    let page = query_handlers::list_waiters_by_restaurant(
        restaurant_id,
        params.into_request(),
        &*state.waiters,
    )
    .await?;
    Ok(Json(page))
}

#[instrument(skip_all, fields(requested = ids.0.len()))]
async fn find_waiters_by_ids(
    State(state): State<WaiterState>,
    ids: IdsQuery,
) -> Result<Json<Vec<Record<Waiter>>>, ApiError> {
    let found = query_handlers::find_waiters_by_ids(&ids.0, &*state.waiters).await?;
    Ok(Json(found))
}

#[instrument(
    skip_all,
    fields(correlation_id = %ctx.correlation_id, restaurant_id = input.restaurant_id)
)]
async fn create_waiter(
    State(state): State<WaiterState>,
    ctx: RequestContext,
    Json(input): Json<Waiter>,
) -> Result<(StatusCode, Json<Record<Waiter>>), ApiError> {
    let command = commands::CreateWaiter {
        correlation_id: ctx.correlation_id,
        input,
    };
    let record = command_handlers::handle_create_waiter(
        &command,
        state.clock.as_ref(),
        &*state.waiters,
        state.references(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_waiter(
    State(state): State<WaiterState>,
    Path(waiter_id): Path<EntityId>,
) -> Result<Json<Record<Waiter>>, ApiError> {
    Ok(Json(query_handlers::get_waiter_by_id(waiter_id, &*state.waiters).await?))
}

#[instrument(skip(state, ctx, input), fields(correlation_id = %ctx.correlation_id))]
async fn update_waiter(
    State(state): State<WaiterState>,
    ctx: RequestContext,
    Path(waiter_id): Path<EntityId>,
    Json(input): Json<Waiter>,
) -> Result<Json<Record<Waiter>>, ApiError> {
    let command = commands::UpdateWaiter {
        correlation_id: ctx.correlation_id,
        waiter_id,
        input,
    };
    let record = command_handlers::handle_update_waiter(
        &command,
        state.clock.as_ref(),
        &*state.waiters,
        state.references(),
    )
    .await?;
    Ok(Json(record))
}

#[instrument(skip(state, ctx), fields(correlation_id = %ctx.correlation_id))]
async fn delete_waiter(
    State(state): State<WaiterState>,
    ctx: RequestContext,
    Path(waiter_id): Path<EntityId>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteWaiter {
        correlation_id: ctx.correlation_id,
        waiter_id,
    };
    command_handlers::handle_delete_waiter(&command, &*state.waiters).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Returns the router for the waiter context.
pub fn router() -> Router<WaiterState> {
    Router::new()
        .route("/", get(list_waiters).post(create_waiter))
        .route("/by-ids", get(find_waiters_by_ids))
        .route("/by-restaurant/{id}", get(list_waiters_by_restaurant))
        .route(
            "/{id}",
            get(get_waiter).put(update_waiter).delete(delete_waiter),
        )
}
