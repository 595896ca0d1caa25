//! Integration tests for the table service routes.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use sabor_core::IdSet;
use sabor_core::record::{EntityRef, Record};
use sabor_table::domain::aggregates::Table;
use sabor_test_support::{FailingEntityClient, InMemoryRepository, fixed_now};
use serde_json::json;

fn seeded_table(id: i64, restaurant_id: i64, label: &str) -> Record<Table> {
    Record::new(
        id,
        Table {
            restaurant_id,
            table_identifier: label.to_owned(),
            waiters_id: IdSet::new(),
        },
        fixed_now(),
    )
}

#[tokio::test]
async fn test_create_table_with_known_references_returns_201() {
    // Arrange
    let tables = Arc::new(InMemoryRepository::<Table>::new());
    let restaurants = common::peer(&[1]);
    let waiters = common::peer(&[4, 5]);
    let app = common::table_app(tables.clone(), restaurants.clone(), waiters.clone());

    // Act
    let (status, json) = common::post_json(
        app,
        "/api/tables",
        &json!({ "restaurant_id": 1, "table_identifier": "T1", "waiters_id": [5, 4, 5] }),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["waiters_id"], json!([4, 5]));
    assert_eq!(restaurants.calls(), vec!["get_by_id(1)".to_owned()]);
    assert_eq!(waiters.calls(), vec!["get_by_ids({4, 5})".to_owned()]);
    assert_eq!(tables.records().len(), 1);
}

#[tokio::test]
async fn test_create_table_for_unknown_restaurant_is_404() {
    // Arrange
    let tables = Arc::new(InMemoryRepository::<Table>::new());
    let app = common::table_app(tables.clone(), common::peer(&[]), common::peer(&[4]));

    // Act
    let (status, json) = common::post_json(
        app,
        "/api/tables",
        &json!({ "restaurant_id": 1, "table_identifier": "T1", "waiters_id": [4] }),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "invalid_reference");
    assert_eq!(json["message"], "invalid reference: restaurant_id");
    assert!(tables.records().is_empty());
}

#[tokio::test]
async fn test_create_table_when_waiter_service_is_down_is_500() {
    let tables = Arc::new(InMemoryRepository::<Table>::new());
    let waiters = Arc::new(FailingEntityClient::<EntityRef>::new());
    let app = common::table_app(tables.clone(), common::peer(&[1]), waiters);

    let (status, json) = common::post_json(
        app,
        "/api/tables",
        &json!({ "restaurant_id": 1, "table_identifier": "T1", "waiters_id": [4] }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "dependency_unavailable");
    assert!(tables.records().is_empty());
}

#[tokio::test]
async fn test_update_unknown_table_is_404_not_found() {
    let app = common::table_app(
        Arc::new(InMemoryRepository::<Table>::new()),
        common::peer(&[1]),
        common::peer(&[]),
    );

    let (status, json) = common::put_json(
        app,
        "/api/tables/8",
        &json!({ "restaurant_id": 1, "table_identifier": "T8" }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn test_tables_by_ids_is_all_or_nothing() {
    // Arrange
    let tables = Arc::new(InMemoryRepository::with_records(vec![
        seeded_table(1, 7, "T1"),
        seeded_table(2, 7, "T2"),
    ]));
    let build = || common::table_app(tables.clone(), common::peer(&[]), common::peer(&[]));

    // Act
    let (complete, found) = common::get_json(build(), "/api/tables/by-ids?ids=1,2").await;
    let (partial, error) = common::get_json(build(), "/api/tables/by-ids?ids=1&ids=2&ids=5").await;

    // Assert
    assert_eq!(complete, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 2);
    assert_eq!(partial, StatusCode::NOT_FOUND);
    assert_eq!(error["message"], "no table records found for identifiers 5");
}

#[tokio::test]
async fn test_tables_by_restaurant_only_lists_that_restaurant() {
    let tables = Arc::new(InMemoryRepository::with_records(vec![
        seeded_table(1, 7, "T1"),
        seeded_table(2, 8, "T1"),
        seeded_table(3, 7, "T2"),
    ]));
    let app = common::table_app(tables, common::peer(&[]), common::peer(&[]));

    let (status, json) = common::get_json(app, "/api/tables/all-by-restaurant/7").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_elements"], 2);
    assert_eq!(json["content"][1]["table_identifier"], "T2");
}
