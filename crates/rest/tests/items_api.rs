//! Integration tests for the catalog item endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{assert_failure, create_test_server, ids, seed_item};

#[tokio::test]
async fn test_create_item_with_defaults() {
    let (server, _backend) = create_test_server();

    let response = server
        .post("/api/items")
        .json(&json!({"name": "Widget", "unit-price": 9.99}))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Widget");
    assert_eq!(body["data"]["unit-price"], 9.99);
    assert_eq!(body["data"]["stock-quantity"], 0);
    assert!(body["data"]["category"].is_null());
}

#[tokio::test]
async fn test_create_item_round_trip() {
    let (server, _backend) = create_test_server();

    let created: Value = server
        .post("/api/items")
        .json(&json!({
            "name": "Hammer",
            "unit-price": "12.50",
            "stock-quantity": 4,
            "category": "tools"
        }))
        .await
        .json();
    assert_eq!(created["data"]["unit-price"], 12.5);

    let id = created["data"]["id"].as_i64().unwrap();
    let fetched: Value = server.get(&format!("/api/items/{}", id)).await.json();
    assert_eq!(fetched["data"], created["data"]);
}

#[tokio::test]
async fn test_create_item_missing_price() {
    let (server, _backend) = create_test_server();

    let response = server
        .post("/api/items")
        .json(&json!({"name": "Widget"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        assert_failure(&response.json()),
        "missing required field: unit-price"
    );
}

#[tokio::test]
async fn test_create_item_invalid_price() {
    let (server, _backend) = create_test_server();

    let response = server
        .post("/api/items")
        .json(&json!({"name": "Widget", "unit-price": "free"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let message = assert_failure(&response.json());
    assert!(message.contains("unit-price"));
}

#[tokio::test]
async fn test_get_missing_item() {
    let (server, _backend) = create_test_server();

    let response = server.get("/api/items/42").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        assert_failure(&response.json()),
        "CatalogItem 42 not found"
    );
}

#[tokio::test]
async fn test_list_items_category_filter() {
    let (server, backend) = create_test_server();
    seed_item(&backend, "Hammer", Some("tools")).await;
    seed_item(&backend, "Apple", Some("food")).await;
    seed_item(&backend, "Wrench", Some("tools")).await;
    seed_item(&backend, "Mystery", None).await;

    let body: Value = server.get("/api/items?category=tools").await.json();
    assert_eq!(body["success"], true);
    assert_eq!(ids(&body), vec![1, 3]);
    assert_eq!(body["pagination"]["total"], 2);
    assert_eq!(body["pagination"]["pages"], 1);
    for item in body["data"].as_array().unwrap() {
        assert_eq!(item["category"], "tools");
    }

    let body: Value = server.get("/api/items").await.json();
    assert_eq!(body["pagination"]["total"], 4);
}

#[tokio::test]
async fn test_list_items_empty_category_is_ignored() {
    let (server, backend) = create_test_server();
    seed_item(&backend, "Hammer", Some("tools")).await;
    seed_item(&backend, "Mystery", None).await;

    let body: Value = server.get("/api/items?category=").await.json();
    assert_eq!(body["pagination"]["total"], 2);
}

#[tokio::test]
async fn test_list_items_unknown_category() {
    let (server, backend) = create_test_server();
    seed_item(&backend, "Hammer", Some("tools")).await;

    let body: Value = server.get("/api/items?category=toys").await.json();
    assert_eq!(body["data"], json!([]));
    assert_eq!(
        body["pagination"],
        json!({"page": 1, "per_page": 10, "total": 0, "pages": 0})
    );
}
