//! Integration tests for the persona endpoints.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_create_and_fetch_persona() {
    let app = helpers::TestApp::new();
    let id = app.create_persona("ana@example.com", 30).await;

    let response = app.request("GET", &format!("/api/v1/personas/{id}"), None).await;
    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["email"], json!("ana@example.com"));
    assert_eq!(data["nombre_completo"], json!("Ana Pérez"));
    assert_eq!(data["es_mayor_de_edad"], json!(true));
    assert!(data["created_at"].is_string());
}

#[tokio::test]
async fn test_duplicate_email_is_bad_request() {
    let app = helpers::TestApp::new();
    app.create_persona("ana@example.com", 30).await;

    let response = app
        .request(
            "POST",
            "/api/v1/personas",
            Some(json!({
                "nombre": "Otra",
                "apellido": "Ana",
                "email": "ana@example.com",
                "edad": 25,
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], json!("DUPLICATE_KEY"));
    assert_eq!(app.store.row_count("personas").await, 1);
}

#[tokio::test]
async fn test_invalid_body_is_rejected() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/v1/personas",
            Some(json!({
                "nombre": "A",
                "apellido": "Pérez",
                "email": "not-an-email",
                "edad": 30,
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], json!("VALIDATION_ERROR"));

    let missing_field = app
        .request("POST", "/api/v1/personas", Some(json!({"nombre": "Ana"})))
        .await;
    assert_eq!(missing_field.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.row_count("personas").await, 0);
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let app = helpers::TestApp::new();
    let id = app.create_persona("ana@example.com", 30).await;
    let path = format!("/api/v1/personas/{id}");

    for _ in 0..2 {
        let response = app.request("PUT", &path, Some(json!({"edad": 31}))).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["data"]["edad"], json!(31));
        assert_eq!(response.body["data"]["telefono"], json!("555-0100"));
    }

    let cleared = app.request("PUT", &path, Some(json!({"telefono": null}))).await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert_eq!(cleared.body["data"]["telefono"], json!(null));
    assert_eq!(cleared.body["data"]["edad"], json!(31));
}

#[tokio::test]
async fn test_missing_persona_is_not_found() {
    let app = helpers::TestApp::new();
    app.create_persona("ana@example.com", 30).await;
    let path = "/api/v1/personas/does-not-exist";

    assert_eq!(app.request("GET", path, None).await.status, StatusCode::NOT_FOUND);
    let update = app.request("PUT", path, Some(json!({"edad": 40}))).await;
    assert_eq!(update.status, StatusCode::NOT_FOUND);
    assert_eq!(update.body["error"], json!("NOT_FOUND"));
    assert_eq!(app.request("DELETE", path, None).await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.row_count("personas").await, 1);
}

#[tokio::test]
async fn test_list_window_and_delete() {
    let app = helpers::TestApp::new();
    let mut ids = Vec::new();
    for (email, edad) in [("a@x.com", 17), ("b@x.com", 18), ("c@x.com", 19)] {
        ids.push(app.create_persona(email, edad).await);
    }

    let page = app.request("GET", "/api/v1/personas?skip=1&limit=1", None).await;
    assert_eq!(page.status, StatusCode::OK);
    let rows = page.body["data"].as_array().expect("list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["email"], json!("b@x.com"));

    let past_end = app.request("GET", "/api/v1/personas?skip=3", None).await;
    assert_eq!(past_end.body["data"], json!([]));

    let too_large = app.request("GET", "/api/v1/personas?limit=101", None).await;
    assert_eq!(too_large.status, StatusCode::BAD_REQUEST);

    let deleted = app
        .request("DELETE", &format!("/api/v1/personas/{}", ids[0]), None)
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    let remaining = app.request("GET", "/api/v1/personas", None).await;
    assert_eq!(remaining.body["data"].as_array().map(Vec::len), Some(2));
}
