// src/handlers/crm.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    models::{
        common::{EntityId, ImportSummary, Page, PageRequest},
        crm::{Contact, ContactInput},
        dashboard::ContactSummary,
    },
    services::dashboard_service::summarize_contacts,
};

// =============================================================================
//  CONTATOS
// =============================================================================

// GET /api/contacts
#[utoipa::path(
    get,
    path = "/api/contacts",
    tag = "CRM",
    params(PageRequest),
    responses(
        (status = 200, description = "Lista de contatos", body = Page<Contact>),
        (status = 502, description = "Falha no backend")
    )
)]
pub async fn list_contacts(
    State(app_state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let contacts = app_state.contacts
        .list(&page)
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(contacts)))
}

// POST /api/contacts
#[utoipa::path(
    post,
    path = "/api/contacts",
    tag = "CRM",
    request_body = ContactInput,
    responses(
        (status = 201, description = "Contato criado", body = Contact),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_contact(
    State(app_state): State<AppState>,
    Json(payload): Json<ContactInput>,
) -> Result<impl IntoResponse, ApiError> {
    let contact = app_state.crm_service
        .create_contact(payload)
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::CREATED, Json(contact)))
}

// GET /api/contacts/{id}
#[utoipa::path(
    get,
    path = "/api/contacts/{id}",
    tag = "CRM",
    params(("id" = String, Path, description = "ID do contato")),
    responses(
        (status = 200, description = "Contato", body = Contact),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn get_contact(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let contact = app_state.contacts
        .get(&EntityId::parse(&id))
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(contact)))
}

// PUT /api/contacts/{id}
#[utoipa::path(
    put,
    path = "/api/contacts/{id}",
    tag = "CRM",
    params(("id" = String, Path, description = "ID do contato")),
    request_body = ContactInput,
    responses(
        (status = 200, description = "Contato atualizado", body = Contact),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn update_contact(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ContactInput>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = payload.trimmed();
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error())?;

    let contact = app_state.contacts
        .update(&EntityId::parse(&id), &payload)
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(contact)))
}

// DELETE /api/contacts/{id}
#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    tag = "CRM",
    params(("id" = String, Path, description = "ID do contato")),
    responses((status = 204, description = "Contato removido"))
)]
pub async fn delete_contact(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state.contacts
        .delete(&EntityId::parse(&id))
        .await
        .map_err(|e| e.to_api_error())?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  IMPORTAÇÃO E ESTATÍSTICAS
// =============================================================================

// POST /api/contacts/import
#[utoipa::path(
    post,
    path = "/api/contacts/import",
    tag = "CRM",
    request_body(content = String, content_type = "text/csv", description = "CSV com cabeçalho (firstName,lastName,email,...)"),
    responses(
        (status = 200, description = "Resumo da importação", body = ImportSummary),
        (status = 400, description = "Arquivo sem as colunas obrigatórias")
    )
)]
pub async fn import_contacts(
    State(app_state): State<AppState>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state.crm_service
        .import_csv(&body)
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/contacts/stats
#[utoipa::path(
    get,
    path = "/api/contacts/stats",
    tag = "CRM",
    responses((status = 200, description = "Contagens por tipo e estado", body = ContactSummary))
)]
pub async fn contact_stats(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let contacts = app_state.contacts
        .list_all()
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(summarize_contacts(&contacts, Utc::now()))))
}
