//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use registro_api::{AppState, build_app};
use registro_core::config::AppConfig;
use registro_database::StoreManager;
use registro_database::store::MemoryStoreProvider;

/// Configuration used by most tests: in-memory store, two plain tables and
/// one audited table with a status column.
pub const TEST_CONFIG: &str = r#"
    [store]
    provider = "memory"

    [logging]
    level = "debug"
    format = "pretty"

    [[resources]]
    table = "productos"

    [[resources]]
    table = "demo"

    [resources.profile.order]
    field = "id"
    direction = "desc"

    [resources.profile.audit]
    created = "fecha_creado"
    updated = "fecha_edit"

    [resources.profile.status]
    column = "estado"
    active = "activo"
    inactive = "inactivo"
"#;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store, for direct inspection
    pub store: Arc<MemoryStoreProvider>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a test application over a fresh in-memory store
    pub fn new() -> Self {
        Self::with_config(TEST_CONFIG)
    }

    /// Create a test application from a TOML configuration document
    pub fn with_config(toml: &str) -> Self {
        let config = AppConfig::from_toml(toml).expect("Failed to parse test config");
        let store = Arc::new(MemoryStoreProvider::new());
        let state = AppState::new(config.clone(), StoreManager::from_provider(store.clone()))
            .expect("Failed to build app state");

        Self {
            router: build_app(state),
            store,
            config,
        }
    }

    /// Send a request through the router
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a persona through the API and return its id
    pub async fn create_persona(&self, email: &str, edad: i64) -> String {
        let response = self
            .request(
                "POST",
                "/api/v1/personas",
                Some(serde_json::json!({
                    "nombre": "Ana",
                    "apellido": "Pérez",
                    "email": email,
                    "edad": edad,
                    "telefono": "555-0100",
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["data"]["id"]
            .as_str()
            .expect("persona id")
            .to_string()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
