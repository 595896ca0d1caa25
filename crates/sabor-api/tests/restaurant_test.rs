//! Integration tests for the restaurant service routes.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use sabor_core::record::Record;
use sabor_restaurant::domain::aggregates::{Menu, MenuItem, Restaurant};
use sabor_test_support::{InMemoryRepository, fixed_now};
use serde_json::json;

fn casa_sabor() -> serde_json::Value {
    json!({
        "name": "Casa Sabor",
        "address": "Rua Augusta 1200, São Paulo",
        "phone": "+5511987654321",
        "website": "https://casasabor.example"
    })
}

fn seeded_restaurant(id: i64, name: &str) -> Record<Restaurant> {
    Record::new(
        id,
        Restaurant {
            name: name.to_owned(),
            address: "Rua Augusta 1200".to_owned(),
            phone: "5511987654321".to_owned(),
            website: None,
            logo: None,
        },
        fixed_now(),
    )
}

fn seeded_item(id: i64, menu_id: i64, name: &str) -> Record<MenuItem> {
    Record::new(
        id,
        MenuItem {
            menu_id,
            name: name.to_owned(),
            price: rust_decimal::Decimal::new(2450, 2),
            preparation_time: 15,
        },
        fixed_now(),
    )
}

#[tokio::test]
async fn test_create_restaurant_returns_201_with_identity_and_timestamps() {
    // Arrange
    let service = common::RestaurantService::default();

    // Act
    let (status, json) = common::post_json(service.app(), "/api/restaurants", &casa_sabor()).await;

    // Assert
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["id"], 1);
    assert_eq!(json["name"], "Casa Sabor");
    assert_eq!(json["created_at"], common::FIXED_NOW);
    assert_eq!(json["updated_at"], common::FIXED_NOW);
    assert_eq!(service.restaurants.records().len(), 1);
}

#[tokio::test]
async fn test_create_restaurant_with_bad_fields_returns_field_map() {
    // Arrange
    let service = common::RestaurantService::default();
    let mut body = casa_sabor();
    body["name"] = json!("   ");
    body["phone"] = json!("call us");

    // Act
    let (status, json) = common::post_json(service.app(), "/api/restaurants", &body).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["name"], "name must not be blank");
    assert_eq!(
        json["phone"],
        "phone must be 7 to 15 digits with an optional leading +"
    );
    assert!(service.restaurants.records().is_empty());
}

#[tokio::test]
async fn test_create_restaurant_with_missing_field_is_rejected_before_the_core() {
    let service = common::RestaurantService::default();

    let (status, _) =
        common::post_json(service.app(), "/api/restaurants", &json!({ "name": "Casa" })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(service.restaurants.records().is_empty());
}

#[tokio::test]
async fn test_get_unknown_restaurant_returns_404_body() {
    let service = common::RestaurantService::default();

    let (status, json) = common::get_json(service.app(), "/api/restaurants/42").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
    assert_eq!(json["status"], 404);
    assert_eq!(json["message"], "restaurant not found: 42");
}

#[tokio::test]
async fn test_list_restaurants_pages_results() {
    // Arrange
    let service = common::RestaurantService {
        restaurants: Arc::new(InMemoryRepository::with_records(
            vec![
                seeded_restaurant(1, "A"),
                seeded_restaurant(2, "B"),
                seeded_restaurant(3, "C"),
            ],
        )),
        ..Default::default()
    };

    // Act
    let (status, json) = common::get_json(service.app(), "/api/restaurants?page=1&size=2").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_elements"], 3);
    assert_eq!(json["total_pages"], 2);
    assert_eq!(json["page"], 1);
    assert_eq!(json["content"].as_array().unwrap().len(), 1);
    assert_eq!(json["content"][0]["name"], "C");
}

#[tokio::test]
async fn test_update_restaurant_keeps_identity() {
    let service = common::RestaurantService {
        restaurants: Arc::new(InMemoryRepository::with_records(
            vec![seeded_restaurant(5, "Old name")],
        )),
        ..Default::default()
    };

    let (status, json) =
        common::put_json(service.app(), "/api/restaurants/5", &casa_sabor()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], 5);
    assert_eq!(json["name"], "Casa Sabor");
    assert_eq!(service.restaurants.get(5).unwrap().fields.name, "Casa Sabor");
}

#[tokio::test]
async fn test_update_restaurant_ignores_identity_fields_in_the_body() {
    // Arrange
    let service = common::RestaurantService {
        restaurants: Arc::new(InMemoryRepository::with_records(
            vec![seeded_restaurant(5, "Old name")],
        )),
        ..Default::default()
    };
    let mut body = casa_sabor();
    body["id"] = json!(99);
    body["created_at"] = json!("2000-01-01T00:00:00Z");

    // Act
    let (status, updated) = common::put_json(service.app(), "/api/restaurants/5", &body).await;
    let (_, read) = common::get_json(service.app(), "/api/restaurants/5").await;
    let (missing, _) = common::get_json(service.app(), "/api/restaurants/99").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    for json in [&updated, &read] {
        assert_eq!(json["id"], 5);
        assert_eq!(json["created_at"], common::FIXED_NOW);
        assert_eq!(json["name"], "Casa Sabor");
    }
    assert_eq!(missing, StatusCode::NOT_FOUND);
    assert_eq!(service.restaurants.records().len(), 1);
}

#[tokio::test]
async fn test_delete_restaurant_then_get_is_404() {
    let service = common::RestaurantService {
        restaurants: Arc::new(InMemoryRepository::with_records(
            vec![seeded_restaurant(5, "Casa")],
        )),
        ..Default::default()
    };

    let status = common::delete(service.app(), "/api/restaurants/5").await;
    let (after, _) = common::get_json(service.app(), "/api/restaurants/5").await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(after, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_menu_for_unknown_restaurant_is_invalid_reference() {
    // Arrange
    let service = common::RestaurantService::default();

    // Act
    let (status, json) = common::post_json(
        service.app(),
        "/api/menus",
        &json!({ "restaurant_id": 99, "name": "Dinner" }),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "invalid_reference");
    assert_eq!(json["message"], "invalid reference: restaurant_id");
    assert!(service.menus.records().is_empty());
}

#[tokio::test]
async fn test_create_menu_for_existing_restaurant_then_list_by_restaurant() {
    // Arrange
    let service = common::RestaurantService {
        restaurants: Arc::new(InMemoryRepository::with_records(
            vec![seeded_restaurant(1, "Casa")],
        )),
        ..Default::default()
    };

    // Act
    let (status, created) = common::post_json(
        service.app(),
        "/api/menus",
        &json!({ "restaurant_id": 1, "name": "Dinner" }),
    )
    .await;
    let (_, page) = common::get_json(service.app(), "/api/menus/by-restaurant/1").await;

    // Assert
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["restaurant_id"], 1);
    assert_eq!(page["total_elements"], 1);
    assert_eq!(page["content"][0]["name"], "Dinner");
}

#[tokio::test]
async fn test_create_menu_item_checks_the_menu() {
    let service = common::RestaurantService {
        menus: Arc::new(InMemoryRepository::with_records(vec![
            Record::new(
                2,
                Menu {
                    restaurant_id: 1,
                    name: "Lunch".to_owned(),
                },
                fixed_now(),
            ),
        ])),
        ..Default::default()
    };
    let item = |menu_id: i64| {
        json!({ "menu_id": menu_id, "name": "Feijoada", "price": "39.90", "preparation_time": 25 })
    };

    let (known, json) = common::post_json(service.app(), "/api/menu-items", &item(2)).await;
    let (unknown, _) = common::post_json(service.app(), "/api/menu-items", &item(3)).await;

    assert_eq!(known, StatusCode::CREATED);
    assert_eq!(json["price"], "39.90");
    assert_eq!(unknown, StatusCode::NOT_FOUND);
    assert_eq!(service.menu_items.records().len(), 1);
}

#[tokio::test]
async fn test_menu_items_by_ids_returns_every_requested_item() {
    // Arrange
    let service = common::RestaurantService {
        menu_items: Arc::new(InMemoryRepository::with_records(
            vec![
                seeded_item(101, 2, "Feijoada"),
                seeded_item(102, 2, "Moqueca"),
                seeded_item(103, 2, "Pão de queijo"),
            ],
        )),
        ..Default::default()
    };

    // Act
    let (status, json) =
        common::get_json(service.app(), "/api/menu-items/by-ids?ids=103&ids=101").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![101, 103]);
}

#[tokio::test]
async fn test_menu_items_by_ids_with_missing_identifier_is_404() {
    // Arrange
    let service = common::RestaurantService {
        menu_items: Arc::new(InMemoryRepository::with_records(
            vec![seeded_item(101, 2, "Feijoada")],
        )),
        ..Default::default()
    };

    // Act
    let (status, json) = common::get_json(service.app(), "/api/menu-items/by-ids?ids=101,104").await;

    // Assert
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "incomplete_batch");
    assert_eq!(json["message"], "no menu item records found for identifiers 104");
}

#[tokio::test]
async fn test_menu_items_by_ids_with_garbage_identifier_is_400() {
    let service = common::RestaurantService::default();

    let (status, json) = common::get_json(service.app(), "/api/menu-items/by-ids?ids=abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["ids"].is_string());
}
