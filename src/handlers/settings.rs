// src/handlers/settings.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    models::settings::AppSettings,
};

// GET /api/settings
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Settings",
    responses((status = 200, description = "Configurações (padrões do backend na primeira carga)", body = AppSettings))
)]
pub async fn get_settings(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let settings = app_state.settings_service
        .load()
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(settings)))
}

// PUT /api/settings
#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "Settings",
    request_body = AppSettings,
    responses((status = 200, description = "Configurações salvas", body = AppSettings))
)]
pub async fn update_settings(
    State(app_state): State<AppState>,
    Json(payload): Json<AppSettings>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = app_state.settings_service
        .save(payload)
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(updated)))
}
