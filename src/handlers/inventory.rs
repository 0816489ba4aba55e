// src/handlers/inventory.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::ApiError,
    config::AppState,
    models::{
        common::EntityId,
        dashboard::UnitSummary,
        inventory::{DevelopmentUnit, PropertyType, PropertyTypeInput, PropertyTypeRow, UnitGroup, UnitInput},
    },
    services::{dashboard_service::summarize_units, grouping::ExpandedGroups},
};

// =============================================================================
//  ÁREA 1: TIPOS DE IMÓVEL
// =============================================================================

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GroupedQuery {
    /// Com termo de busca a lista volta plana, em ordem alfabética
    pub search: Option<String>,
}

// GET /api/property-types
#[utoipa::path(
    get,
    path = "/api/property-types",
    tag = "Inventory",
    responses((status = 200, description = "Tipos de imóvel", body = Vec<PropertyType>))
)]
pub async fn list_property_types(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let items = app_state.property_types
        .list()
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(items)))
}

// GET /api/property-types/grouped
#[utoipa::path(
    get,
    path = "/api/property-types/grouped",
    tag = "Inventory",
    params(GroupedQuery),
    responses((status = 200, description = "Raízes seguidas dos filhos; órfãos no final", body = Vec<PropertyTypeRow>))
)]
pub async fn grouped_property_types(
    State(app_state): State<AppState>,
    Query(query): Query<GroupedQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = app_state.inventory_service
        .grouped_property_types(query.search.as_deref())
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(rows)))
}

// POST /api/property-types
#[utoipa::path(
    post,
    path = "/api/property-types",
    tag = "Inventory",
    request_body = PropertyTypeInput,
    responses(
        (status = 201, description = "Tipo criado", body = PropertyType),
        (status = 400, description = "Dados inválidos ou hierarquia com mais de um nível")
    )
)]
pub async fn create_property_type(
    State(app_state): State<AppState>,
    Json(payload): Json<PropertyTypeInput>,
) -> Result<impl IntoResponse, ApiError> {
    let item = app_state.inventory_service
        .create_property_type(payload)
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::CREATED, Json(item)))
}

// PUT /api/property-types/{id}
#[utoipa::path(
    put,
    path = "/api/property-types/{id}",
    tag = "Inventory",
    params(("id" = String, Path, description = "ID do tipo")),
    request_body = PropertyTypeInput,
    responses(
        (status = 200, description = "Tipo atualizado", body = PropertyType),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn update_property_type(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PropertyTypeInput>,
) -> Result<impl IntoResponse, ApiError> {
    let item = app_state.inventory_service
        .update_property_type(&EntityId::parse(&id), payload)
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(item)))
}

// DELETE /api/property-types/{id}
#[utoipa::path(
    delete,
    path = "/api/property-types/{id}",
    tag = "Inventory",
    params(("id" = String, Path, description = "ID do tipo")),
    responses((status = 204, description = "Tipo removido (filhos viram órfãos)"))
)]
pub async fn delete_property_type(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state.property_types
        .delete(&EntityId::parse(&id))
        .await
        .map_err(|e| e.to_api_error())?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ÁREA 2: UNIDADES
// =============================================================================

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UnitsQuery {
    /// Filtra as unidades de um empreendimento
    pub development_id: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UnitGroupsQuery {
    /// IDs de empreendimentos expandidos, separados por vírgula
    pub expanded: Option<String>,
    /// Empreendimento cujo grupo deve inverter o estado (expandir/recolher)
    pub toggle: Option<String>,
}

// GET /api/units
#[utoipa::path(
    get,
    path = "/api/units",
    tag = "Inventory",
    params(UnitsQuery),
    responses((status = 200, description = "Unidades", body = Vec<DevelopmentUnit>))
)]
pub async fn list_units(
    State(app_state): State<AppState>,
    Query(query): Query<UnitsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let units = match query.development_id.as_deref() {
        Some(id) => app_state.units.list_by_development(&EntityId::parse(id)).await,
        None => app_state.units.list().await,
    }
    .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(units)))
}

// GET /api/units/grouped
#[utoipa::path(
    get,
    path = "/api/units/grouped",
    tag = "Inventory",
    params(UnitGroupsQuery),
    responses((status = 200, description = "Unidades agrupadas por empreendimento", body = Vec<UnitGroup>))
)]
pub async fn grouped_units(
    State(app_state): State<AppState>,
    Query(query): Query<UnitGroupsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut expanded = ExpandedGroups::from_query(query.expanded.as_deref());
    if let Some(id) = query.toggle.as_deref() {
        expanded.toggle(&EntityId::parse(id));
    }
    let groups = app_state.inventory_service
        .grouped_units(&expanded)
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(groups)))
}

// POST /api/units
#[utoipa::path(
    post,
    path = "/api/units",
    tag = "Inventory",
    request_body = UnitInput,
    responses(
        (status = 201, description = "Unidade criada", body = DevelopmentUnit),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_unit(
    State(app_state): State<AppState>,
    Json(payload): Json<UnitInput>,
) -> Result<impl IntoResponse, ApiError> {
    let unit = app_state.inventory_service
        .create_unit(payload)
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::CREATED, Json(unit)))
}

// PUT /api/units/{id}
#[utoipa::path(
    put,
    path = "/api/units/{id}",
    tag = "Inventory",
    params(("id" = String, Path, description = "ID da unidade")),
    request_body = UnitInput,
    responses(
        (status = 200, description = "Unidade atualizada", body = DevelopmentUnit),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn update_unit(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UnitInput>,
) -> Result<impl IntoResponse, ApiError> {
    let unit = app_state.inventory_service
        .update_unit(&EntityId::parse(&id), payload)
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(unit)))
}

// DELETE /api/units/{id}
#[utoipa::path(
    delete,
    path = "/api/units/{id}",
    tag = "Inventory",
    params(("id" = String, Path, description = "ID da unidade")),
    responses((status = 204, description = "Unidade removida"))
)]
pub async fn delete_unit(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state.units
        .delete(&EntityId::parse(&id))
        .await
        .map_err(|e| e.to_api_error())?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/units/stats
#[utoipa::path(
    get,
    path = "/api/units/stats",
    tag = "Inventory",
    responses((status = 200, description = "Unidades por estado e tipo", body = UnitSummary))
)]
pub async fn unit_stats(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let units = app_state.units
        .list()
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(summarize_units(&units))))
}
