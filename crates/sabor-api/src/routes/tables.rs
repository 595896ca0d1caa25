//! Routes for the Table bounded context.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use sabor_core::EntityId;
use sabor_core::record::Record;
use sabor_core::repository::Page;
use sabor_table::application::{command_handlers, query_handlers};
use sabor_table::domain::aggregates::Table;
use sabor_table::domain::commands;
use tracing::instrument;

use crate::context::RequestContext;
use crate::error::ApiError;
use crate::query::{IdsQuery, PageParams};
use crate::state::TableState;

/// GET /
async fn list_tables(
    State(state): State<TableState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Record<Table>>>, ApiError> {
    let page = query_handlers::list_tables(params.into_request(), &*state.tables).await?;
    Ok(Json(page))
}

/// GET /all-by-restaurant/{id}
#[instrument(skip(state, params))]
async fn list_tables_by_restaurant(
    State(state): State<TableState>,
    Path(restaurant_id): Path<EntityId>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Record<Table>>>, ApiError> {
    let page =
        query_handlers::list_tables_by_restaurant(restaurant_id, params.into_request(), &*state.tables)
            .await?;
    Ok(Json(page))
}

/// GET /by-ids
#[instrument(skip_all, fields(requested = ids.0.len()))]
async fn find_tables_by_ids(
    State(state): State<TableState>,
    ids: IdsQuery,
) -> Result<Json<Vec<Record<Table>>>, ApiError> {
    Ok(Json(query_handlers::find_tables_by_ids(&ids.0, &*state.tables).await?))
}

/// POST /
#[instrument(
    skip_all,
    fields(correlation_id = %ctx.correlation_id, restaurant_id = input.restaurant_id)
)]
async fn create_table(
    State(state): State<TableState>,
    ctx: RequestContext,
    Json(input): Json<Table>,
) -> Result<(StatusCode, Json<Record<Table>>), ApiError> {
    let command = commands::CreateTable {
        correlation_id: ctx.correlation_id,
        input,
    };
    let record = command_handlers::handle_create_table(
        &command,
        state.clock.as_ref(),
        &*state.tables,
        state.references(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /{id}
async fn get_table(
    State(state): State<TableState>,
    Path(table_id): Path<EntityId>,
) -> Result<Json<Record<Table>>, ApiError> {
    Ok(Json(query_handlers::get_table_by_id(table_id, &*state.tables).await?))
}

/// PUT /{id}
#[instrument(skip(state, ctx, input), fields(correlation_id = %ctx.correlation_id))]
async fn update_table(
    State(state): State<TableState>,
    ctx: RequestContext,
    Path(table_id): Path<EntityId>,
    Json(input): Json<Table>,
) -> Result<Json<Record<Table>>, ApiError> {
    let command = commands::UpdateTable {
        correlation_id: ctx.correlation_id,
        table_id,
        input,
    };
    let record = command_handlers::handle_update_table(
        &command,
        state.clock.as_ref(),
        &*state.tables,
        state.references(),
    )
    .await?;
    Ok(Json(record))
}

/// DELETE /{id}
#[instrument(skip(state, ctx), fields(correlation_id = %ctx.correlation_id))]
async fn delete_table(
    State(state): State<TableState>,
    ctx: RequestContext,
    Path(table_id): Path<EntityId>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteTable {
        correlation_id: ctx.correlation_id,
        table_id,
    };
    command_handlers::handle_delete_table(&command, &*state.tables).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Returns the router for the table context.
pub fn router() -> Router<TableState> {
    Router::new()
        .route("/", get(list_tables).post(create_table))
        .route("/by-ids", get(find_tables_by_ids))
        .route("/all-by-restaurant/{id}", get(list_tables_by_restaurant))
        .route(
            "/{id}",
            get(get_table).put(update_table).delete(delete_table),
        )
}
