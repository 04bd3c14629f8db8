//! Health check handlers.

use axum::Json;
use axum::extract::{Query, State};

use registro_core::traits::StoreProvider;
use registro_core::traits::store::StoreHealth;

use crate::dto::request::StoreHealthParams;
use crate::dto::response::{ApiResponse, HealthResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        service: state.config.server.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// GET /health/store
///
/// Reports reachability as data; an unreachable store is still a 200.
pub async fn store_health(
    State(state): State<AppState>,
    Query(params): Query<StoreHealthParams>,
) -> ApiResult<Json<ApiResponse<StoreHealth>>> {
    let health = state.store.health_check(params.verify_auth).await?;
    if !health.connected {
        tracing::warn!(message = %health.message, "Store health check failed");
    }
    Ok(Json(ApiResponse::ok(health)))
}
