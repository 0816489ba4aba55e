// src/handlers/locations.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    models::{
        catalog::{Amenity, Currency},
        common::EntityId,
        locations::{City, Country, Neighborhood},
    },
};

// GET /api/locations/countries
#[utoipa::path(
    get,
    path = "/api/locations/countries",
    tag = "Locations",
    responses((status = 200, description = "Países", body = Vec<Country>))
)]
pub async fn list_countries(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let countries = app_state.locations
        .countries()
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(countries)))
}

// GET /api/locations/countries/{id}/cities
#[utoipa::path(
    get,
    path = "/api/locations/countries/{id}/cities",
    tag = "Locations",
    params(("id" = String, Path, description = "ID do país")),
    responses((status = 200, description = "Cidades do país", body = Vec<City>))
)]
pub async fn list_cities(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cities = app_state.locations
        .cities_by_country(&EntityId::parse(&id))
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(cities)))
}

// GET /api/locations/cities/{id}/neighborhoods
#[utoipa::path(
    get,
    path = "/api/locations/cities/{id}/neighborhoods",
    tag = "Locations",
    params(("id" = String, Path, description = "ID da cidade")),
    responses((status = 200, description = "Bairros da cidade", body = Vec<Neighborhood>))
)]
pub async fn list_neighborhoods(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let neighborhoods = app_state.locations
        .neighborhoods_by_city(&EntityId::parse(&id))
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(neighborhoods)))
}

// =============================================================================
//  CATÁLOGOS
// =============================================================================

// GET /api/currencies
#[utoipa::path(
    get,
    path = "/api/currencies",
    tag = "Catalogs",
    responses((status = 200, description = "Moedas", body = Vec<Currency>))
)]
pub async fn list_currencies(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let currencies = app_state.catalog
        .currencies()
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(currencies)))
}

// GET /api/amenities
#[utoipa::path(
    get,
    path = "/api/amenities",
    tag = "Catalogs",
    responses((status = 200, description = "Amenidades", body = Vec<Amenity>))
)]
pub async fn list_amenities(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let amenities = app_state.catalog
        .amenities()
        .await
        .map_err(|e| e.to_api_error())?;

    Ok((StatusCode::OK, Json(amenities)))
}
