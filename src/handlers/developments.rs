// src/handlers/developments.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    common::error::ApiError,
    config::AppState,
    models::{
        common::EntityId,
        dashboard::DevelopmentSummary,
        developments::{Development, DevelopmentInput},
    },
    services::dashboard_service::summarize_developments,
};

// GET /api/developments
#[utoipa::path(
    get,
    path = "/api/developments",
    tag = "Developments",
    responses((status = 200, description = "Empreendimentos", body = Vec<Development>))
)]
pub async fn list_developments(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let items = app_state.developments
        .list()
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(items)))
}

// GET /api/developments/{id}
#[utoipa::path(
    get,
    path = "/api/developments/{id}",
    tag = "Developments",
    params(("id" = String, Path, description = "ID do empreendimento")),
    responses(
        (status = 200, description = "Empreendimento", body = Development),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn get_development(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let item = app_state.developments
        .get(&EntityId::parse(&id))
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(item)))
}

// POST /api/developments
#[utoipa::path(
    post,
    path = "/api/developments",
    tag = "Developments",
    request_body = DevelopmentInput,
    responses(
        (status = 201, description = "Empreendimento criado", body = Development),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_development(
    State(app_state): State<AppState>,
    Json(payload): Json<DevelopmentInput>,
) -> Result<impl IntoResponse, ApiError> {
    let item = app_state.inventory_service
        .create_development(payload)
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::CREATED, Json(item)))
}

// PUT /api/developments/{id}
#[utoipa::path(
    put,
    path = "/api/developments/{id}",
    tag = "Developments",
    params(("id" = String, Path, description = "ID do empreendimento")),
    request_body = DevelopmentInput,
    responses(
        (status = 200, description = "Empreendimento atualizado", body = Development),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn update_development(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<DevelopmentInput>,
) -> Result<impl IntoResponse, ApiError> {
    let item = app_state.inventory_service
        .update_development(&EntityId::parse(&id), payload)
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(item)))
}

// DELETE /api/developments/{id}
#[utoipa::path(
    delete,
    path = "/api/developments/{id}",
    tag = "Developments",
    params(("id" = String, Path, description = "ID do empreendimento")),
    responses((status = 204, description = "Empreendimento removido"))
)]
pub async fn delete_development(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state.developments
        .delete(&EntityId::parse(&id))
        .await
        .map_err(|e| e.to_api_error())?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/developments/stats
#[utoipa::path(
    get,
    path = "/api/developments/stats",
    tag = "Developments",
    responses((status = 200, description = "Cards de empreendimentos", body = DevelopmentSummary))
)]
pub async fn development_stats(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let items = app_state.developments
        .list()
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(summarize_developments(&items, Utc::now()))))
}
