//! Integration tests for the health endpoints.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_service_health() {
    let app = helpers::TestApp::new();
    let response = app.request("GET", "/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], json!("ok"));
    assert_eq!(response.body["data"]["service"], json!("Registro"));
}

#[tokio::test]
async fn test_store_health() {
    let app = helpers::TestApp::new();
    let response = app.request("GET", "/health/store?verify_auth=true", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["connected"], json!(true));
}

#[tokio::test]
async fn test_custom_api_version() {
    let app = helpers::TestApp::with_config(
        "[server]\napi_version = \"v2\"\n[store]\nprovider = \"memory\"\n",
    );
    assert_eq!(
        app.request("GET", "/api/v2/productos", None).await.status,
        StatusCode::OK
    );
    assert_eq!(
        app.request("GET", "/api/v1/productos", None).await.status,
        StatusCode::NOT_FOUND
    );
}
