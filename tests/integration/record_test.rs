//! Integration tests for the generic table endpoints.

mod helpers;

use axum::http::StatusCode;
use reqwest::Url;
use serde_json::{Value, json};

async fn seed_productos(app: &helpers::TestApp) {
    for (id, nombre, precio) in [(1, "Lápiz", 17), (2, "Cuaderno", 18), (3, "Mochila", 19)] {
        let response = app
            .request(
                "POST",
                "/api/v1/productos",
                Some(json!({"data": {"id": id, "nombre": nombre, "precio": precio}})),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    }
}

fn ids(body: &Value) -> Vec<i64> {
    body["data"]
        .as_array()
        .map(|rows| rows.iter().filter_map(|r| r["id"].as_i64()).collect())
        .unwrap_or_default()
}

/// `path?filters=<json>` with the query string percent-encoded.
fn filtered(path: &str, filters: Value, extra: &[(&str, &str)]) -> String {
    let mut url = Url::parse("http://localhost").expect("base url");
    url.set_path(path);
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in extra {
            pairs.append_pair(key, value);
        }
        pairs.append_pair("filters", &filters.to_string());
    }
    format!("{}?{}", url.path(), url.query().unwrap_or_default())
}

#[tokio::test]
async fn test_operator_filters() {
    let app = helpers::TestApp::new();
    seed_productos(&app).await;

    let gte = app
        .request(
            "GET",
            &filtered("/api/v1/productos", json!({"precio": {"$gte": 18}}), &[]),
            None,
        )
        .await;
    assert_eq!(gte.status, StatusCode::OK);
    assert_eq!(ids(&gte.body), vec![2, 3]);

    let ilike = app
        .request(
            "GET",
            &filtered("/api/v1/productos", json!({"nombre": {"$ilike": "%LA%"}}), &[]),
            None,
        )
        .await;
    assert_eq!(ids(&ilike.body), vec![3]);

    let eq = app
        .request(
            "GET",
            &filtered("/api/v1/productos", json!({"nombre": "Cuaderno"}), &[]),
            None,
        )
        .await;
    assert_eq!(ids(&eq.body), vec![2]);
}

#[tokio::test]
async fn test_count_matches_list() {
    let app = helpers::TestApp::new();
    seed_productos(&app).await;

    let f = json!({"precio": {"$lt": 19}});
    let count = app
        .request("GET", &filtered("/api/v1/productos/count/total", f.clone(), &[]), None)
        .await;
    assert_eq!(count.status, StatusCode::OK);
    assert_eq!(count.body["data"]["count"], json!(2));

    let list = app
        .request("GET", &filtered("/api/v1/productos", f, &[("limit", "1000")]), None)
        .await;
    assert_eq!(ids(&list.body).len(), 2);
}

#[tokio::test]
async fn test_malformed_filters() {
    let app = helpers::TestApp::new();
    seed_productos(&app).await;

    let not_json = app
        .request("GET", "/api/v1/productos?filters=%7Bbroken", None)
        .await;
    assert_eq!(not_json.status, StatusCode::BAD_REQUEST);

    // Unknown operators are skipped unless strict filtering is configured.
    let path = filtered("/api/v1/productos", json!({"precio": {"$between": 18}}), &[]);
    let lenient = app.request("GET", &path, None).await;
    assert_eq!(lenient.status, StatusCode::OK);
    assert_eq!(ids(&lenient.body).len(), 3);

    let strict = helpers::TestApp::with_config(
        "[server]\nstrict_filters = true\n[store]\nprovider = \"memory\"\n",
    );
    let rejected = strict.request("GET", &path, None).await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);
    assert_eq!(rejected.body["error"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_update_delete_and_missing_rows() {
    let app = helpers::TestApp::new();
    seed_productos(&app).await;

    let updated = app
        .request("PUT", "/api/v1/productos/2", Some(json!({"data": {"precio": 25}})))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["precio"], json!(25));
    assert_eq!(updated.body["data"]["nombre"], json!("Cuaderno"));

    let missing = app
        .request("PUT", "/api/v1/productos/99", Some(json!({"data": {"precio": 1}})))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    assert_eq!(
        app.request("DELETE", "/api/v1/productos/2", None).await.status,
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        app.request("DELETE", "/api/v1/productos/2", None).await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(app.store.row_count("productos").await, 2);
}

#[tokio::test]
async fn test_update_cannot_change_id() {
    let app = helpers::TestApp::new();
    seed_productos(&app).await;

    let response = app
        .request("PUT", "/api/v1/productos/1", Some(json!({"data": {"id": 2}})))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], json!("VALIDATION_ERROR"));

    let listed = app.request("GET", "/api/v1/productos", None).await;
    assert_eq!(ids(&listed.body), vec![1, 2, 3]);
    let two = app.request("GET", "/api/v1/productos/2", None).await;
    assert_eq!(two.body["data"]["nombre"], json!("Cuaderno"));
}

#[tokio::test]
async fn test_like_with_many_wildcards_answers() {
    let app = helpers::TestApp::new();
    app.request(
        "POST",
        "/api/v1/productos",
        Some(json!({"data": {"id": 1, "nombre": "a".repeat(60)}})),
    )
    .await;

    let pattern = format!("{}b", "%a".repeat(30));
    let response = app
        .request(
            "GET",
            &filtered("/api/v1/productos", json!({"nombre": {"$like": pattern}}), &[]),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], json!([]));
}

#[tokio::test]
async fn test_deactivate_keeps_row() {
    let app = helpers::TestApp::new();
    for id in [1, 2] {
        app.request(
            "POST",
            "/api/v1/demo",
            Some(json!({"data": {"id": id, "estado": "activo"}})),
        )
        .await;
    }

    let response = app.request("POST", "/api/v1/demo/1/deactivate", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["estado"], json!("inactivo"));
    assert!(response.body["data"]["fecha_edit"].is_string());

    let listed = app.request("GET", "/api/v1/demo", None).await;
    assert_eq!(ids(&listed.body), vec![2, 1]);

    let plain = app.request("POST", "/api/v1/productos/1/deactivate", None).await;
    assert_eq!(plain.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_table_is_not_found() {
    let app = helpers::TestApp::new();
    let response = app.request("GET", "/api/v1/usuarios", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], json!("NOT_FOUND"));
}
