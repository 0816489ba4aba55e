// src/handlers/finance.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::ApiError,
    config::AppState,
    models::{
        common::{EntityId, Page, PageRequest},
        dashboard::QuotaSummary,
        finance::{CreateQuotaPayload, DevelopmentQuota, PlanPreview, PlanReport, PlanRequest},
    },
    services::dashboard_service::summarize_quotas,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct QuotasQuery {
    /// Cuotas de uma unidade (ignora a paginação)
    pub unit_id: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

// =============================================================================
//  CUOTAS
// =============================================================================

// GET /api/quotas
#[utoipa::path(
    get,
    path = "/api/quotas",
    tag = "Finance",
    params(QuotasQuery),
    responses((status = 200, description = "Cuotas", body = Page<DevelopmentQuota>))
)]
pub async fn list_quotas(
    State(app_state): State<AppState>,
    Query(query): Query<QuotasQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let quotas = match query.unit_id.as_deref() {
        Some(unit_id) => app_state.quotas
            .list_by_unit(&EntityId::parse(unit_id))
            .await
            .map(Page::from_items),
        None => app_state.quotas
            .list(&PageRequest { page: query.page, size: query.size })
            .await,
    }
    .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(quotas)))
}

// POST /api/quotas
#[utoipa::path(
    post,
    path = "/api/quotas",
    tag = "Finance",
    request_body = CreateQuotaPayload,
    responses(
        (status = 201, description = "Cuota criada", body = DevelopmentQuota),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_quota(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateQuotaPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let quota = app_state.finance_service
        .create_quota(payload)
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::CREATED, Json(quota)))
}

// DELETE /api/quotas/{id}
#[utoipa::path(
    delete,
    path = "/api/quotas/{id}",
    tag = "Finance",
    params(("id" = String, Path, description = "ID da cuota")),
    responses((status = 204, description = "Cuota removida"))
)]
pub async fn delete_quota(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state.quotas
        .delete(&EntityId::parse(&id))
        .await
        .map_err(|e| e.to_api_error())?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/quotas/stats
#[utoipa::path(
    get,
    path = "/api/quotas/stats",
    tag = "Finance",
    responses((status = 200, description = "Totais pagos, pendentes e vencidos", body = QuotaSummary))
)]
pub async fn quota_stats(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let quotas = app_state.quotas
        .list_all()
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(summarize_quotas(&quotas, Utc::now().date_naive()))))
}

// =============================================================================
//  PLANO DE CUOTAS
// =============================================================================

// POST /api/quotas/plan/preview
#[utoipa::path(
    post,
    path = "/api/quotas/plan/preview",
    tag = "Finance",
    request_body = PlanRequest,
    responses(
        (status = 200, description = "Cuotas que seriam criadas", body = PlanPreview),
        (status = 400, description = "Parâmetros inválidos")
    )
)]
pub async fn preview_plan(
    State(app_state): State<AppState>,
    Json(payload): Json<PlanRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let preview = app_state.finance_service
        .preview_plan(&payload)
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(preview)))
}

// POST /api/quotas/plan
#[utoipa::path(
    post,
    path = "/api/quotas/plan",
    tag = "Finance",
    request_body = PlanRequest,
    responses(
        (status = 201, description = "Todas as cuotas criadas", body = PlanReport),
        (status = 207, description = "Lote interrompido na primeira falha", body = PlanReport),
        (status = 400, description = "Parâmetros inválidos (nenhuma cuota criada)")
    )
)]
pub async fn generate_plan(
    State(app_state): State<AppState>,
    Json(payload): Json<PlanRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let report = app_state.finance_service
        .generate_plan(&payload)
        .await
        .map_err(|e| e.to_api_error())?;

    let status = if report.completed { StatusCode::CREATED } else { StatusCode::MULTI_STATUS };
    Ok((status, Json(report)))
}
