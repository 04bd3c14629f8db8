//! Handlers for the configured generic tables.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use registro_core::error::AppError;
use registro_core::types::{RecordId, Row};

use crate::dto::request::RecordPayload;
use crate::dto::response::{ApiResponse, CountResponse};
use crate::error::ApiResult;
use crate::extractors::{FilterParams, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// POST /{table}
pub async fn create_record(
    State(state): State<AppState>,
    Path(table): Path<String>,
    ValidatedJson(payload): ValidatedJson<RecordPayload>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Row>>)> {
    let row = state.records(&table)?.create(payload.data).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(row))))
}

/// GET /{table}?skip&limit&filters
pub async fn list_records(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Query(page): Query<PaginationParams>,
    Query(filters): Query<FilterParams>,
) -> ApiResult<Json<ApiResponse<Vec<Row>>>> {
    let service = state.records(&table)?;
    let window = page.into_window(state.config.server.max_page_size)?;
    let filter = filters.into_filter(state.filter_mode())?;
    let rows = service.list(&window, &filter).await?;
    Ok(Json(ApiResponse::ok(rows)))
}

/// GET /{table}/{id}
pub async fn get_record(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
) -> ApiResult<Json<ApiResponse<Row>>> {
    let id = RecordId::new(id);
    let row = state.records(&table)?.get(&id).await?;
    Ok(Json(ApiResponse::ok(row)))
}

/// PUT /{table}/{id}
pub async fn update_record(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
    ValidatedJson(payload): ValidatedJson<RecordPayload>,
) -> ApiResult<Json<ApiResponse<Row>>> {
    let id = RecordId::new(id);
    let row = state.records(&table)?.update(&id, payload.data).await?;
    Ok(Json(ApiResponse::ok(row)))
}

/// DELETE /{table}/{id}
pub async fn delete_record(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let id = RecordId::new(id);
    if state.records(&table)?.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(format!("Record {id} not found in '{table}'")).into())
    }
}

/// POST /{table}/{id}/deactivate
pub async fn deactivate_record(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
) -> ApiResult<Json<ApiResponse<Row>>> {
    let id = RecordId::new(id);
    let row = state.records(&table)?.deactivate(&id).await?;
    Ok(Json(ApiResponse::ok(row)))
}

/// GET /{table}/count/total?filters
pub async fn count_records(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Query(filters): Query<FilterParams>,
) -> ApiResult<Json<ApiResponse<CountResponse>>> {
    let service = state.records(&table)?;
    let filter = filters.into_filter(state.filter_mode())?;
    let count = service.count(&filter).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}
