//! Route definitions for the Registro HTTP API.
//!
//! Health probes live at the root; persona and generic table routes are
//! mounted under `/api/{version}`.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(persona_routes())
        .merge(record_routes());

    Router::new()
        .merge(health_routes())
        .nest(&format!("/api/{}", state.config.server.api_version), api_routes)
        .with_state(state)
}

/// Service and store health
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/store", get(handlers::health::store_health))
}

/// Persona CRUD
fn persona_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/personas",
            get(handlers::persona::list_personas).post(handlers::persona::create_persona),
        )
        .route(
            "/personas/{id}",
            get(handlers::persona::get_persona)
                .put(handlers::persona::update_persona)
                .delete(handlers::persona::delete_persona),
        )
}

/// CRUD over every configured table
fn record_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{table}",
            get(handlers::record::list_records).post(handlers::record::create_record),
        )
        .route("/{table}/count/total", get(handlers::record::count_records))
        .route(
            "/{table}/{id}",
            get(handlers::record::get_record)
                .put(handlers::record::update_record)
                .delete(handlers::record::delete_record),
        )
        .route(
            "/{table}/{id}/deactivate",
            post(handlers::record::deactivate_record),
        )
}
