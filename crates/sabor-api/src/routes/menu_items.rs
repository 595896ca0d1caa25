//! Routes for menu items.
//!
//! `GET /by-ids` is the batch endpoint the order service uses to check the
//! items of an order; it answers 404 unless every requested item exists.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use sabor_core::EntityId;
use sabor_core::record::Record;
use sabor_core::repository::Page;
use sabor_restaurant::application::{command_handlers, query_handlers};
use sabor_restaurant::domain::aggregates::MenuItem;
use sabor_restaurant::domain::commands;
use tracing::instrument;

use crate::context::RequestContext;
use crate::error::ApiError;
use crate::query::{IdsQuery, PageParams};
use crate::state::RestaurantState;

async fn list_menu_items(
    State(state): State<RestaurantState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Record<MenuItem>>>, ApiError> {
    let page = query_handlers::list_menu_items(params.into_request(), &*state.menu_items).await?;
    Ok(Json(page))
}

/// GET /by-menu/{id}
#[instrument(skip(state, params))]
async fn list_menu_items_by_menu(
    State(state): State<RestaurantState>,
    Path(menu_id): Path<EntityId>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Record<MenuItem>>>, ApiError> {
    let page =
        query_handlers::list_menu_items_by_menu(menu_id, params.into_request(), &*state.menu_items)
            .await?;
    Ok(Json(page))
}

/// GET /by-ids
#[instrument(skip_all, fields(requested = ids.0.len()))]
async fn find_menu_items_by_ids(
    State(state): State<RestaurantState>,
    ids: IdsQuery,
) -> Result<Json<Vec<Record<MenuItem>>>, ApiError> {
    let found = query_handlers::find_menu_items_by_ids(&ids.0, &*state.menu_items).await?;
    Ok(Json(found))
}

/// POST /
#[instrument(
    skip_all,
    fields(correlation_id = %ctx.correlation_id, menu_id = input.menu_id)
)]
async fn create_menu_item(
    State(state): State<RestaurantState>,
    ctx: RequestContext,
    Json(input): Json<MenuItem>,
) -> Result<(StatusCode, Json<Record<MenuItem>>), ApiError> {
    let command = commands::CreateMenuItem {
        correlation_id: ctx.correlation_id,
        input,
    };
    let record = command_handlers::handle_create_menu_item(
        &command,
        state.clock.as_ref(),
        &*state.menu_items,
        state.menu_lookup(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_menu_item(
    State(state): State<RestaurantState>,
    Path(menu_item_id): Path<EntityId>,
) -> Result<Json<Record<MenuItem>>, ApiError> {
    let record = query_handlers::get_menu_item_by_id(menu_item_id, &*state.menu_items).await?;
    Ok(Json(record))
}

/// PUT /{id}
#[instrument(skip(state, ctx, input), fields(correlation_id = %ctx.correlation_id))]
async fn update_menu_item(
    State(state): State<RestaurantState>,
    ctx: RequestContext,
    Path(menu_item_id): Path<EntityId>,
    Json(input): Json<MenuItem>,
) -> Result<Json<Record<MenuItem>>, ApiError> {
    let command = commands::UpdateMenuItem {
        correlation_id: ctx.correlation_id,
        menu_item_id,
        input,
    };
    let record = command_handlers::handle_update_menu_item(
        &command,
        state.clock.as_ref(),
        &*state.menu_items,
        state.menu_lookup(),
    )
    .await?;
    Ok(Json(record))
}

/// DELETE /{id}
#[instrument(skip(state, ctx), fields(correlation_id = %ctx.correlation_id))]
async fn delete_menu_item(
    State(state): State<RestaurantState>,
    ctx: RequestContext,
    Path(menu_item_id): Path<EntityId>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteMenuItem {
        correlation_id: ctx.correlation_id,
        menu_item_id,
    };
    command_handlers::handle_delete_menu_item(&command, &*state.menu_items).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Returns the router for menu items.
pub fn router() -> Router<RestaurantState> {
    Router::new()
        .route("/", get(list_menu_items).post(create_menu_item))
        .route("/by-ids", get(find_menu_items_by_ids))
        .route("/by-menu/{id}", get(list_menu_items_by_menu))
        .route(
            "/{id}",
            get(get_menu_item)
                .put(update_menu_item)
                .delete(delete_menu_item),
        )
}
