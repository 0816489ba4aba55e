// src/handlers/dashboard.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    models::dashboard::DashboardOverview,
};

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Todos os cards, recalculados a cada chamada", body = DashboardOverview),
        (status = 502, description = "Falha no backend")
    )
)]
pub async fn get_overview(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let overview = app_state.dashboard_service
        .overview()
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(overview)))
}
