//! Routes for menus.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use sabor_core::EntityId;
use sabor_core::record::Record;
use sabor_core::repository::Page;
use sabor_restaurant::application::{command_handlers, query_handlers};
use sabor_restaurant::domain::aggregates::Menu;
use sabor_restaurant::domain::commands;
use tracing::instrument;

use crate::context::RequestContext;
use crate::error::ApiError;
use crate::query::PageParams;
use crate::state::RestaurantState;

async fn list_menus(
    State(state): State<RestaurantState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Record<Menu>>>, ApiError> {
    let page = query_handlers::list_menus(params.into_request(), &*state.menus).await?;
    Ok(Json(page))
}

/// GET /by-restaurant/{id}
#[instrument(skip(state, params))]
async fn list_menus_by_restaurant(
    State(state): State<RestaurantState>,
    Path(restaurant_id): Path<EntityId>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Record<Menu>>>, ApiError> {
    let page = query_handlers::list_menus_by_restaurant(
        restaurant_id,
        params.into_request(),
        &*state.menus,
    )
    .await?;
    Ok(Json(page))
}

/// POST /
#[instrument(
    skip_all,
    fields(correlation_id = %ctx.correlation_id, restaurant_id = input.restaurant_id)
)]
async fn create_menu(
    State(state): State<RestaurantState>,
    ctx: RequestContext,
    Json(input): Json<Menu>,
) -> Result<(StatusCode, Json<Record<Menu>>), ApiError> {
    let command = commands::CreateMenu {
        correlation_id: ctx.correlation_id,
        input,
    };
    let record = command_handlers::handle_create_menu(
        &command,
        state.clock.as_ref(),
        &*state.menus,
        state.restaurant_lookup(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_menu(
    State(state): State<RestaurantState>,
    Path(menu_id): Path<EntityId>,
) -> Result<Json<Record<Menu>>, ApiError> {
    Ok(Json(query_handlers::get_menu_by_id(menu_id, &*state.menus).await?))
}

/// PUT /{id}
#[instrument(skip(state, ctx, input), fields(correlation_id = %ctx.correlation_id))]
async fn update_menu(
    State(state): State<RestaurantState>,
    ctx: RequestContext,
    Path(menu_id): Path<EntityId>,
    Json(input): Json<Menu>,
) -> Result<Json<Record<Menu>>, ApiError> {
    let command = commands::UpdateMenu {
        correlation_id: ctx.correlation_id,
        menu_id,
        input,
    };
    let record = command_handlers::handle_update_menu(
        &command,
        state.clock.as_ref(),
        &*state.menus,
        state.restaurant_lookup(),
    )
    .await?;
    Ok(Json(record))
}

/// DELETE /{id}
#[instrument(skip(state, ctx), fields(correlation_id = %ctx.correlation_id))]
async fn delete_menu(
    State(state): State<RestaurantState>,
    ctx: RequestContext,
    Path(menu_id): Path<EntityId>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteMenu {
        correlation_id: ctx.correlation_id,
        menu_id,
    };
    command_handlers::handle_delete_menu(&command, &*state.menus).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Returns the router for menus.
pub fn router() -> Router<RestaurantState> {
    Router::new()
        .route("/", get(list_menus).post(create_menu))
        .route("/by-restaurant/{id}", get(list_menus_by_restaurant))
        .route(
            "/{id}",
            get(get_menu).put(update_menu).delete(delete_menu),
        )
}
