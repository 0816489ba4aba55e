// src/client/inventory_repo.rs

use crate::{
    client::BackendClient,
    common::error::AppError,
    models::{
        common::EntityId,
        inventory::{DevelopmentUnit, PropertyType, PropertyTypeInput, UnitInput},
    },
};

const PROPERTY_TYPES_PATH: &str = "/property-types";
const UNITS_PATH: &str = "/development-units";

// =========================================================================
//  TIPOS DE IMÓVEL
// =========================================================================

#[derive(Clone)]
pub struct PropertyTypeRepository {
    client: BackendClient,
}

impl PropertyTypeRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<PropertyType>, AppError> {
        self.client.get_all(PROPERTY_TYPES_PATH).await
    }

    pub async fn create(&self, input: &PropertyTypeInput) -> Result<PropertyType, AppError> {
        self.client.post_json(PROPERTY_TYPES_PATH, input).await
    }

    pub async fn update(&self, id: &EntityId, input: &PropertyTypeInput) -> Result<PropertyType, AppError> {
        self.client.put_json(&format!("{}/{}", PROPERTY_TYPES_PATH, id.segment()?), input).await
    }

    // Sem cascata: filhos de um tipo apagado viram órfãos
    pub async fn delete(&self, id: &EntityId) -> Result<(), AppError> {
        self.client.delete(&format!("{}/{}", PROPERTY_TYPES_PATH, id.segment()?)).await
    }
}

// =========================================================================
//  UNIDADES
// =========================================================================

#[derive(Clone)]
pub struct UnitRepository {
    client: BackendClient,
}

impl UnitRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<DevelopmentUnit>, AppError> {
        self.client.get_all(UNITS_PATH).await
    }

    pub async fn list_by_development(&self, development_id: &EntityId) -> Result<Vec<DevelopmentUnit>, AppError> {
        self.client.get_all(&format!("/developments/{}/units", development_id.segment()?)).await
    }

    pub async fn create(&self, input: &UnitInput) -> Result<DevelopmentUnit, AppError> {
        self.client.post_json(UNITS_PATH, input).await
    }

    pub async fn update(&self, id: &EntityId, input: &UnitInput) -> Result<DevelopmentUnit, AppError> {
        self.client.put_json(&format!("{}/{}", UNITS_PATH, id.segment()?), input).await
    }

    pub async fn delete(&self, id: &EntityId) -> Result<(), AppError> {
        self.client.delete(&format!("{}/{}", UNITS_PATH, id.segment()?)).await
    }
}
