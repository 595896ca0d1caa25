//! Routes for restaurants.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use sabor_core::EntityId;
use sabor_core::record::Record;
use sabor_core::repository::Page;
use sabor_restaurant::application::{command_handlers, query_handlers};
use sabor_restaurant::domain::aggregates::Restaurant;
use sabor_restaurant::domain::commands;
use tracing::instrument;

use crate::context::RequestContext;
use crate::error::ApiError;
use crate::query::PageParams;
use crate::state::RestaurantState;

/// GET /
#[instrument(skip_all, fields(page = ?params.page, size = ?params.size))]
async fn list_restaurants(
    State(state): State<RestaurantState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Record<Restaurant>>>, ApiError> {
    let page = query_handlers::list_restaurants(params.into_request(), &*state.restaurants).await?;
    Ok(Json(page))
}

/// POST /
#[instrument(skip_all, fields(correlation_id = %ctx.correlation_id))]
async fn create_restaurant(
    State(state): State<RestaurantState>,
    ctx: RequestContext,
    Json(input): Json<Restaurant>,
) -> Result<(StatusCode, Json<Record<Restaurant>>), ApiError> {
    let command = commands::CreateRestaurant {
        correlation_id: ctx.correlation_id,
        input,
    };
    let record = command_handlers::handle_create_restaurant(
        &command,
        state.clock.as_ref(),
        &*state.restaurants,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /{id}
#[instrument(skip(state))]
async fn get_restaurant(
    State(state): State<RestaurantState>,
    Path(restaurant_id): Path<EntityId>,
) -> Result<Json<Record<Restaurant>>, ApiError> {
    let record = query_handlers::get_restaurant_by_id(restaurant_id, &*state.restaurants).await?;
    Ok(Json(record))
}

/// PUT /{id}
#[instrument(skip(state, ctx, input), fields(correlation_id = %ctx.correlation_id))]
async fn update_restaurant(
    State(state): State<RestaurantState>,
    ctx: RequestContext,
    Path(restaurant_id): Path<EntityId>,
    Json(input): Json<Restaurant>,
) -> Result<Json<Record<Restaurant>>, ApiError> {
    let command = commands::UpdateRestaurant {
        correlation_id: ctx.correlation_id,
        restaurant_id,
        input,
    };
    let record = command_handlers::handle_update_restaurant(
        &command,
        state.clock.as_ref(),
        &*state.restaurants,
    )
    .await?;
    Ok(Json(record))
}

/// DELETE /{id}
#[instrument(skip(state, ctx), fields(correlation_id = %ctx.correlation_id))]
async fn delete_restaurant(
    State(state): State<RestaurantState>,
    ctx: RequestContext,
    Path(restaurant_id): Path<EntityId>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteRestaurant {
        correlation_id: ctx.correlation_id,
        restaurant_id,
    };
    command_handlers::handle_delete_restaurant(&command, &*state.restaurants).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Returns the router for restaurants.
pub fn router() -> Router<RestaurantState> {
    Router::new()
        .route("/", get(list_restaurants).post(create_restaurant))
        .route(
            "/{id}",
            get(get_restaurant)
                .put(update_restaurant)
                .delete(delete_restaurant),
        )
}
