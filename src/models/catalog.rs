// src/models/catalog.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::common::EntityId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub id: EntityId,
    #[schema(example = "USD")]
    pub code: String,
    pub name: Option<String>,
    #[schema(example = "US$")]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Amenity {
    pub id: EntityId,
    #[schema(example = "Piscina")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Agency {
    pub id: EntityId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub active: Option<bool>,
}
