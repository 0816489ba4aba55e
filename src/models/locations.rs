// src/models/locations.rs

// País -> Cidade -> Bairro. Exatamente três níveis.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::common::EntityId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: EntityId,
    #[schema(example = "Paraguay")]
    pub name: String,
    #[schema(example = "PY")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: EntityId,
    #[schema(example = "Asunción")]
    pub name: String,
    pub country_id: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Neighborhood {
    pub id: EntityId,
    #[schema(example = "Villa Morra")]
    pub name: String,
    pub city_id: Option<EntityId>,
}
