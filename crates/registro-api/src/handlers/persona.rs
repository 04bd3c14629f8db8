//! Persona handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use registro_core::error::AppError;
use registro_core::types::RecordId;

use crate::dto::request::{CreatePersonaRequest, UpdatePersonaRequest};
use crate::dto::response::{ApiResponse, PersonaResponse};
use crate::error::ApiResult;
use crate::extractors::{PaginationParams, ValidatedJson};
use crate::state::AppState;

/// Largest page of personas served at once.
pub const MAX_PERSONA_PAGE: u64 = 100;

/// POST /personas
pub async fn create_persona(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreatePersonaRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<PersonaResponse>>)> {
    let persona = state.personas.create(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(PersonaResponse::from(persona))),
    ))
}

/// GET /personas
pub async fn list_personas(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<Vec<PersonaResponse>>>> {
    let window = params.into_window(MAX_PERSONA_PAGE)?;
    let personas = state.personas.list(&window).await?;
    Ok(Json(ApiResponse::ok(
        personas.into_iter().map(PersonaResponse::from).collect(),
    )))
}

/// GET /personas/{id}
pub async fn get_persona(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<PersonaResponse>>> {
    let id = RecordId::new(id);
    let persona = state.personas.get(&id).await?;
    Ok(Json(ApiResponse::ok(persona.into())))
}

/// PUT /personas/{id}
pub async fn update_persona(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdatePersonaRequest>,
) -> ApiResult<Json<ApiResponse<PersonaResponse>>> {
    let id = RecordId::new(id);
    let persona = state.personas.update(&id, req.into()).await?;
    Ok(Json(ApiResponse::ok(persona.into())))
}

/// DELETE /personas/{id}
pub async fn delete_persona(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = RecordId::new(id);
    if state.personas.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(format!("Persona {id} not found")).into())
    }
}
