//! Envelope and error-normalizer contract, end to end.
//!
//! These tests run stub handlers behind the real auth gate and normalizer
//! layers, proving the contract holds for any handler, not just the catalog
//! ones.

mod common;

use axum::{
    Router,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{READONLY_KEY, assert_error_shape, body_json, request, test_state};
use product_catalog_api::error::AppError;
use product_catalog_api::middleware::{auth, errors};
use product_catalog_api::models::product::PaginationMeta;
use product_catalog_api::response::ApiResponse;
use product_catalog_api::state::AppState;

async fn paginated_stub() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "data": [
            { "id": 1, "name": "iMac 24\" M1 2021" },
            { "id": 2, "name": "MacBook Air M2" },
        ],
        "meta": PaginationMeta::new(1, 10, 2),
    }))
}

async fn plain_stub() -> ApiResponse<Value> {
    ApiResponse::success(json!({ "id": 1, "name": "iMac" }))
}

async fn custom_envelope_stub() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "success": true,
        "adminApiKey": "generated-admin",
        "readOnlyApiKey": "generated-readonly",
    }))
}

async fn missing_widget_stub() -> Result<ApiResponse<Value>, AppError> {
    Err(AppError::NotFound("Widget not found".to_string()))
}

async fn validation_stub() -> Result<ApiResponse<Value>, AppError> {
    Err(AppError::Validation(vec![
        "name must be a string".to_string(),
        "price must be a positive number".to_string(),
    ]))
}

/// Stub handlers behind the production middleware stack.
fn demo_app(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/products", get(paginated_stub))
        .route("/api/plain", get(plain_stub))
        .route("/api/custom", get(custom_envelope_stub))
        .route("/api/widgets/9", get(missing_widget_stub))
        .route("/api/widgets", post(validation_stub))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    Router::new()
        .merge(protected)
        .layer(axum_middleware::from_fn(errors::normalize_errors))
        .with_state(state)
}

#[tokio::test]
async fn list_result_keeps_data_and_meta_at_top_level() {
    let app = demo_app(test_state());

    let response = app
        .oneshot(request("GET", "/api/products", Some(READONLY_KEY)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(
        body["meta"],
        json!({ "page": 1, "limit": 10, "total": 2, "totalPages": 1 })
    );
}

#[tokio::test]
async fn plain_result_is_wrapped_into_data() {
    let app = demo_app(test_state());

    let response = app
        .oneshot(request("GET", "/api/plain", Some(READONLY_KEY)))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({ "success": true, "data": { "id": 1, "name": "iMac" } })
    );
}

#[tokio::test]
async fn custom_envelope_passes_through_unchanged() {
    let app = demo_app(test_state());

    let response = app
        .oneshot(request("GET", "/api/custom", Some(READONLY_KEY)))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({
            "success": true,
            "adminApiKey": "generated-admin",
            "readOnlyApiKey": "generated-readonly",
        })
    );
}

#[tokio::test]
async fn not_found_keeps_status_and_message_verbatim() {
    let app = demo_app(test_state());

    let response = app
        .oneshot(request("GET", "/api/widgets/9", Some(READONLY_KEY)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    let message = assert_error_shape(&body, 404, "/api/widgets/9");
    assert_eq!(message, "Widget not found");
}

#[tokio::test]
async fn validation_messages_are_joined() {
    let app = demo_app(test_state());

    let response = app
        .oneshot(request("POST", "/api/widgets", Some(READONLY_KEY)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let message = assert_error_shape(&body, 400, "/api/widgets");
    assert_eq!(
        message,
        "name must be a string, price must be a positive number"
    );
}
