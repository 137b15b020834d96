use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use product_catalog::{app, config::CorsConfig, store::MemoryStore, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    app::build(AppState::new(Arc::new(MemoryStore::new())), &CorsConfig::Any)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, body)
}

fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn health_check() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".into()));
}

#[tokio::test]
async fn create_then_delete_mug() {
    let app = test_app();

    let (status, created) = send(&app, "POST", "/products", Some(json!({"name": "Mug", "price": 9.99}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Mug");
    assert_eq!(created["price"], 9.99);
    assert_eq!(created["description_en"], Value::Null);
    let id = created["id"].as_i64().unwrap();

    let (status, list) = send(&app, "GET", "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&list), vec![id]);

    let (status, body) = send(&app, "DELETE", &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, list) = send(&app, "GET", "/products", None).await;
    assert!(!ids(&list).contains(&id));

    // Deleting again finds nothing.
    let (status, _) = send(&app, "DELETE", &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn new_ids_are_fresh() {
    let app = test_app();
    let (_, first) = send(&app, "POST", "/products", Some(json!({"name": "A", "price": 1.0}))).await;
    let first_id = first["id"].as_i64().unwrap();
    send(&app, "DELETE", &format!("/products/{first_id}"), None).await;

    let (_, second) = send(&app, "POST", "/products", Some(json!({"name": "B", "price": 2.0}))).await;
    assert_ne!(second["id"].as_i64().unwrap(), first_id);
}

#[tokio::test]
async fn put_replaces_all_fields() {
    let app = test_app();
    let (_, created) = send(
        &app,
        "POST",
        "/products",
        Some(json!({
            "name": "Lamp",
            "description_en": "Desk lamp",
            "description_zh": "台灯",
            "description_ar": "مصباح",
            "price": 24.5,
            "image_url": "http://example.com/lamp.jpg"
        })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let replacement = json!({
        "name": "Floor lamp",
        "description_en": "Tall",
        "description_zh": null,
        "description_ar": null,
        "price": 80.0,
        "image_url": null
    });
    let (status, updated) = send(&app, "PUT", &format!("/products/{id}"), Some(replacement.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = send(&app, "GET", "/products", None).await;
    let stored = &list.as_array().unwrap()[0];
    assert_eq!(stored, &updated);
    for field in ["name", "description_en", "description_zh", "description_ar", "price", "image_url"] {
        assert_eq!(stored[field], replacement[field], "field {field}");
    }
}

#[tokio::test]
async fn missing_ids_are_404_and_change_nothing() {
    let app = test_app();
    send(&app, "POST", "/products", Some(json!({"name": "Mug", "price": 9.99}))).await;
    let (_, before) = send(&app, "GET", "/products", None).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/products/999999",
        Some(json!({"name": "Ghost", "price": 1.0})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");

    let (status, _) = send(&app, "DELETE", "/products/999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, after) = send(&app, "GET", "/products", None).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn missing_name_is_a_storage_error() {
    let app = test_app();
    let (status, body) = send(&app, "POST", "/products", Some(json!({"price": 3.0}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");

    let (_, list) = send(&app, "GET", "/products", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn string_price_is_rejected_before_storage() {
    let app = test_app();
    let (status, body) = send(&app, "POST", "/products", Some(json!({"name": "Mug", "price": "9.99"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (_, list) = send(&app, "GET", "/products", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn non_integer_id_is_a_json_400() {
    let app = test_app();

    let (status, body) = send(&app, "DELETE", "/products/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "expected a JSON error body, got {body:?}");

    let (status, body) = send(
        &app,
        "PUT",
        "/products/abc",
        Some(json!({"name": "Mug", "price": 9.99})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "expected a JSON error body, got {body:?}");
}
