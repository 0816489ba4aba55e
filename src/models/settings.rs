// src/models/settings.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::common::EntityId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub company: CompanyInfo,
    pub contacts: Vec<ContactSettings>,
    pub properties: PropertySettings,
    pub catalogs: SettingsCatalogs,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyInfo {
    #[schema(example = "Inmobiliaria del Este")]
    pub name: String,
    pub legal_name: Option<String>,
    #[schema(example = "80012345-6")]
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    /// Agência de origem quando os dados vieram do backend.
    pub agency_id: Option<EntityId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactSettings {
    #[schema(example = "whatsapp")]
    pub channel: String,
    #[schema(example = "+595 981 000000")]
    pub value: String,
    pub label: Option<String>,
    pub primary: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertySettings {
    pub featured: FeaturedCriteria,
    pub premium: PremiumCriteria,
}

// Critérios de curadoria da vitrine (consumidos em outras telas)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct FeaturedCriteria {
    pub max_items: u32,
    pub min_price: Option<Decimal>,
    pub property_types: Vec<String>,
    pub cities: Vec<String>,
    pub require_images: bool,
}

impl Default for FeaturedCriteria {
    fn default() -> Self {
        Self {
            max_items: 6,
            min_price: None,
            property_types: Vec::new(),
            cities: Vec::new(),
            require_images: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PremiumCriteria {
    pub max_items: u32,
    pub min_price: Option<Decimal>,
    pub amenities: Vec<String>,
    pub zones: Vec<String>,
}

impl Default for PremiumCriteria {
    fn default() -> Self {
        Self { max_items: 3, min_price: None, amenities: Vec::new(), zones: Vec::new() }
    }
}

/// Listas de apoio vindas do backend na primeira carga.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsCatalogs {
    pub cities: Vec<String>,
    pub zones: Vec<String>,
    pub amenities: Vec<String>,
    pub property_types: Vec<String>,
}
