//! HTTP round trips against the router with in-memory collaborators.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use catalog_config::ServerConfig;
use catalog_core::{HealthCheck, HealthStatus};
use catalog_repository::{InMemoryProductDao, ProductRepositoryImpl};
use catalog_rest::{create_router, AppState};
use catalog_service::{MemoryCacheService, ProductServiceImpl};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct FixedCheck {
    name: &'static str,
    status: HealthStatus,
}

#[async_trait]
impl HealthCheck for FixedCheck {
    fn name(&self) -> &str {
        self.name
    }

    async fn check(&self) -> HealthStatus {
        self.status.clone()
    }
}

fn state() -> (AppState, Arc<InMemoryProductDao>) {
    let dao = Arc::new(InMemoryProductDao::new());
    let service = ProductServiceImpl::new(
        Arc::new(ProductRepositoryImpl::new(dao.clone())),
        Arc::new(MemoryCacheService::new()),
    );
    (AppState::new(Arc::new(service)), dao)
}

fn app() -> (Router, Arc<InMemoryProductDao>) {
    let (state, dao) = state();
    (create_router(state, &ServerConfig::default()), dao)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn create_widget(app: &Router) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/products",
        Some(json!({ "name": "Widget", "sku": "W-1", "price": 9.99 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"].clone()
}

#[tokio::test]
async fn create_then_get() {
    let (app, _) = app();
    let created = create_widget(&app).await;
    let id = created["id"].as_str().unwrap();

    assert_eq!(created["name"], "Widget");
    assert!(created["created_at"].is_string());
    assert!(created["updated_at"].is_string());

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/products/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["sku"], "W-1");
    assert_eq!(body["data"]["price"], 9.99);
}

#[tokio::test]
async fn create_points_location_at_new_product() {
    let (app, _) = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "name": "Widget", "sku": "W-1", "price": 9.99 }).to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION].to_str().unwrap().to_string();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(location, format!("/api/v1/products/{}", body["data"]["id"].as_str().unwrap()));

    let (status, fetched) = send(&app, Method::GET, &location, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["sku"], "W-1");
}

#[tokio::test]
async fn second_get_is_served_from_cache() {
    let (app, dao) = app();
    let created = create_widget(&app).await;
    let uri = format!("/api/v1/products/{}", created["id"].as_str().unwrap());

    send(&app, Method::GET, &uri, None).await;
    let reads = dao.reads();
    let (status, _) = send(&app, Method::GET, &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(dao.reads(), reads);
}

#[tokio::test]
async fn update_changes_only_given_fields() {
    let (app, _) = app();
    let created = create_widget(&app).await;
    let uri = format!("/api/v1/products/{}", created["id"].as_str().unwrap());
    send(&app, Method::GET, &uri, None).await;

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "price": 19.99 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"], 19.99);
    assert_eq!(body["data"]["name"], "Widget");

    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(body["data"]["price"], 19.99);
}

#[tokio::test]
async fn update_with_null_description_clears_it() {
    let (app, _) = app();
    let (_, body) = send(
        &app,
        Method::POST,
        "/api/v1/products",
        Some(json!({ "name": "Widget", "sku": "W-1", "price": 9.99, "description": "old" })),
    )
    .await;
    let uri = format!("/api/v1/products/{}", body["data"]["id"].as_str().unwrap());
    send(&app, Method::GET, &uri, None).await;

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "price": 5.0 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["description"], "old");

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "description": null }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["description"].is_null());

    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert!(body["data"]["description"].is_null());
    assert_eq!(body["data"]["price"], 5.0);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let (app, _) = app();
    let created = create_widget(&app).await;
    let uri = format!("/api/v1/products/{}", created["id"].as_str().unwrap());
    send(&app, Method::GET, &uri, None).await;

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_id_is_bad_request() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::GET, "/api/v1/products/not-a-uuid", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"].get("details").is_none());
}

#[tokio::test]
async fn invalid_create_is_bad_request() {
    let (app, dao) = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/products",
        Some(json!({ "name": "", "sku": "W-1", "price": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["name", "price"]);
    assert!(dao.is_empty());
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (app, _) = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\":"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_pages_and_searches() {
    let (app, _) = app();
    for (name, sku) in [("Widget", "W-1"), ("Gadget", "G-1"), ("Widget Pro", "W-2")] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/products",
            Some(json!({ "name": name, "sku": sku, "price": 1.5 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, Method::GET, "/api/v1/products?page=1&limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["total_count"], 3);
    assert_eq!(body["data"]["total_pages"], 2);
    assert_eq!(body["data"]["page"], 1);

    let (_, body) = send(&app, Method::GET, "/api/v1/products?search=widget", None).await;
    assert_eq!(body["data"]["total_count"], 2);

    let (status, _) = send(&app, Method::GET, "/api/v1/products?limit=1000", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/api/v1/products?page=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reports_degraded_cache_as_ok() {
    let (state, _) = state();
    let state = state.with_health_checks(vec![
        Arc::new(FixedCheck {
            name: "database",
            status: HealthStatus::Healthy,
        }),
        Arc::new(FixedCheck {
            name: "cache",
            status: HealthStatus::Degraded("connection refused".into()),
        }),
    ]);
    let app = create_router(state, &ServerConfig::default());

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"][1]["name"], "cache");
    assert_eq!(body["checks"][1]["detail"], "connection refused");
}

#[tokio::test]
async fn health_fails_when_database_is_down() {
    let (state, _) = state();
    let state = state.with_health_checks(vec![Arc::new(FixedCheck {
        name: "database",
        status: HealthStatus::Unhealthy("timeout".into()),
    })]);
    let app = create_router(state, &ServerConfig::default());

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");

    let (status, _) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = send(&app, Method::GET, "/live", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/products/{id}"].is_object());
}
