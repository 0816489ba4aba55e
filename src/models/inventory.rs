// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::common::EntityId;

// --- 1. Tipos de Imóvel (catálogo hierárquico, um nível) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyType {
    pub id: EntityId,
    #[schema(example = "Casa")]
    pub name: String,
    pub description: Option<String>,
    pub active: Option<bool>,
    pub parent_id: Option<EntityId>,
    pub parent_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyTypeInput {
    #[validate(length(min = 1, message = "El nombre es obligatorio"))]
    #[schema(example = "Dúplex")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<EntityId>,
}

impl PropertyTypeInput {
    pub fn trimmed(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }
}

fn default_active() -> bool {
    true
}

/// Papel de uma linha na listagem agrupada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GroupRole {
    Root,
    Child,
    Orphan,
    Match,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyTypeRow {
    pub role: GroupRole,
    pub depth: u8,
    #[serde(flatten)]
    pub property_type: PropertyType,
}

// --- 2. Unidades de um Empreendimento ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitType {
    Lot,
    Departamento,
    House,
    Townhouse,
    Duplex,
    Penthouse,
    Studio,
    Office,
    Commercial,
    Warehouse,
    Parking,
    Storage,
}

impl UnitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::Lot => "LOT",
            UnitType::Departamento => "DEPARTAMENTO",
            UnitType::House => "HOUSE",
            UnitType::Townhouse => "TOWNHOUSE",
            UnitType::Duplex => "DUPLEX",
            UnitType::Penthouse => "PENTHOUSE",
            UnitType::Studio => "STUDIO",
            UnitType::Office => "OFFICE",
            UnitType::Commercial => "COMMERCIAL",
            UnitType::Warehouse => "WAREHOUSE",
            UnitType::Parking => "PARKING",
            UnitType::Storage => "STORAGE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitStatus {
    Available,
    Reserved,
    Sold,
    UnderConstruction,
    Delivered,
    Rented,
    Maintenance,
    Unavailable,
}

impl UnitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitStatus::Available => "AVAILABLE",
            UnitStatus::Reserved => "RESERVED",
            UnitStatus::Sold => "SOLD",
            UnitStatus::UnderConstruction => "UNDER_CONSTRUCTION",
            UnitStatus::Delivered => "DELIVERED",
            UnitStatus::Rented => "RENTED",
            UnitStatus::Maintenance => "MAINTENANCE",
            UnitStatus::Unavailable => "UNAVAILABLE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentUnit {
    pub id: EntityId,
    pub development_id: EntityId,
    #[schema(example = "A-12")]
    pub unit_number: String,
    pub unit_name: Option<String>,
    #[serde(rename = "type")]
    pub unit_type: UnitType,
    pub status: UnitStatus,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub area: Option<Decimal>,
    #[schema(example = "m2")]
    pub area_unit: Option<String>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub floor: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitInput {
    #[validate(required(message = "Seleccione un desarrollo"))]
    pub development_id: Option<EntityId>,

    #[validate(length(min = 1, message = "El número de unidad es obligatorio"))]
    pub unit_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,

    #[serde(rename = "type")]
    pub unit_type: UnitType,
    #[serde(default = "default_unit_status")]
    pub status: UnitStatus,

    #[validate(custom(function = "crate::models::finance::validate_positive"))]
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
}

impl UnitInput {
    pub fn trimmed(mut self) -> Self {
        self.unit_number = self.unit_number.trim().to_string();
        self
    }
}

fn default_unit_status() -> UnitStatus {
    UnitStatus::Available
}

/// Unidades de um empreendimento, na ordem de exibição.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitGroup {
    pub development_id: EntityId,
    pub development_title: String,
    pub expanded: bool,
    pub total_units: usize,
    pub available_units: usize,
    pub units: Vec<DevelopmentUnit>,
}
