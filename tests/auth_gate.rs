//! Auth gate behavior against the real application router.
//!
//! Every test here short-circuits in the middleware stack, so no database
//! is required.

mod common;

use axum::http::StatusCode;
use tower::ServiceExt;

use common::{ADMIN_KEY, INACTIVE_KEY, READONLY_KEY, assert_error_shape, body_json, request, test_state};
use product_catalog_api::app;

#[tokio::test]
async fn missing_header_yields_401_api_key_required() {
    let app = app(test_state());

    let response = app
        .oneshot(request("GET", "/api/products", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    let message = assert_error_shape(&body, 401, "/api/products");
    assert_eq!(message, "API key is required");
}

#[tokio::test]
async fn unknown_and_inactive_keys_share_one_message() {
    let app = app(test_state());

    let unknown = app
        .clone()
        .oneshot(request("GET", "/api/products", Some("no-such-key")))
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown_body = body_json(unknown).await;
    let unknown_message = assert_error_shape(&unknown_body, 401, "/api/products");

    let inactive = app
        .oneshot(request("GET", "/api/products", Some(INACTIVE_KEY)))
        .await
        .unwrap();
    assert_eq!(inactive.status(), StatusCode::UNAUTHORIZED);
    let inactive_body = body_json(inactive).await;
    let inactive_message = assert_error_shape(&inactive_body, 401, "/api/products");

    // Identical message in both cases: responses must not reveal whether a
    // key value exists
    assert_eq!(unknown_message, "Invalid or inactive API key");
    assert_eq!(unknown_message, inactive_message);
}

#[tokio::test]
async fn valid_non_admin_key_is_rejected_on_admin_route() {
    let app = app(test_state());

    let response = app
        .oneshot(request(
            "DELETE",
            "/api/admin/products/1",
            Some(READONLY_KEY),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    let message = assert_error_shape(&body, 401, "/api/admin/products/1");
    assert_eq!(message, "Admin access required");
}

#[tokio::test]
async fn admin_key_passes_the_gate() {
    let app = app(test_state());

    // The gate lets the request through to the handler; with no database
    // behind the lazy pool the handler fails, but that failure is a
    // normalized 500, not a 401.
    let response = app
        .oneshot(request("DELETE", "/api/admin/products/1", Some(ADMIN_KEY)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_error_shape(&body, 500, "/api/admin/products/1");
}

#[tokio::test]
async fn readonly_key_passes_non_admin_routes() {
    let app = app(test_state());

    // Same shape of evidence: past the gate, into the (database-less)
    // handler, never a 401.
    let response = app
        .oneshot(request("GET", "/api/products", Some(READONLY_KEY)))
        .await
        .unwrap();

    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_is_public_and_enveloped() {
    let app = app(test_state());

    let response = app.oneshot(request("GET", "/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], serde_json::json!(true));
    assert_eq!(body["data"]["status"], serde_json::json!("ok"));
}

#[tokio::test]
async fn unmatched_route_is_normalized() {
    let app = app(test_state());

    let response = app.oneshot(request("GET", "/nope", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_error_shape(&body, 404, "/nope");
}
