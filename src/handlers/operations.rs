// src/handlers/operations.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    models::{
        common::{EntityId, Page, PageRequest},
        dashboard::ReservationSummary,
        operations::{CreateReservationPayload, DevelopmentReservation},
    },
    services::dashboard_service::summarize_reservations,
};

// GET /api/reservations
#[utoipa::path(
    get,
    path = "/api/reservations",
    tag = "Operations",
    params(PageRequest),
    responses((status = 200, description = "Reservas", body = Page<DevelopmentReservation>))
)]
pub async fn list_reservations(
    State(app_state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let reservations = app_state.reservations
        .list(&page)
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(reservations)))
}

// GET /api/reservations/{id}
#[utoipa::path(
    get,
    path = "/api/reservations/{id}",
    tag = "Operations",
    params(("id" = String, Path, description = "ID da reserva")),
    responses(
        (status = 200, description = "Reserva", body = DevelopmentReservation),
        (status = 404, description = "Não encontrada")
    )
)]
pub async fn get_reservation(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let reservation = app_state.reservations
        .get(&EntityId::parse(&id))
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(reservation)))
}

// POST /api/reservations
#[utoipa::path(
    post,
    path = "/api/reservations",
    tag = "Operations",
    request_body = CreateReservationPayload,
    responses(
        (status = 201, description = "Reserva criada (expiração padrão: +7 dias)", body = DevelopmentReservation),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_reservation(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateReservationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let reservation = app_state.operation_service
        .create_reservation(payload)
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::CREATED, Json(reservation)))
}

// DELETE /api/reservations/{id}
#[utoipa::path(
    delete,
    path = "/api/reservations/{id}",
    tag = "Operations",
    params(("id" = String, Path, description = "ID da reserva")),
    responses((status = 204, description = "Reserva removida"))
)]
pub async fn delete_reservation(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state.reservations
        .delete(&EntityId::parse(&id))
        .await
        .map_err(|e| e.to_api_error())?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/reservations/stats
#[utoipa::path(
    get,
    path = "/api/reservations/stats",
    tag = "Operations",
    responses((status = 200, description = "Reservas por estado", body = ReservationSummary))
)]
pub async fn reservation_stats(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let reservations = app_state.reservations
        .list_all()
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(summarize_reservations(&reservations))))
}
