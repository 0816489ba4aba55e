// src/models/crm.rs

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::serde_utils::json_string;
use crate::models::common::EntityId;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    Client,
    #[default]
    Prospect,
    Buyer,
    Seller,
    Owner,
}

impl ContactType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactType::Client => "client",
            ContactType::Prospect => "prospect",
            ContactType::Buyer => "buyer",
            ContactType::Seller => "seller",
            ContactType::Owner => "owner",
        }
    }
}

impl FromStr for ContactType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "client" => Ok(ContactType::Client),
            "prospect" => Ok(ContactType::Prospect),
            "buyer" => Ok(ContactType::Buyer),
            "seller" => Ok(ContactType::Seller),
            "owner" => Ok(ContactType::Owner),
            other => Err(format!("Tipo de contacto inválido: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    Active,
    Inactive,
    #[default]
    Lead,
    Qualified,
    Converted,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::Active => "active",
            ContactStatus::Inactive => "inactive",
            ContactStatus::Lead => "lead",
            ContactStatus::Qualified => "qualified",
            ContactStatus::Converted => "converted",
        }
    }
}

impl FromStr for ContactStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(ContactStatus::Active),
            "inactive" => Ok(ContactStatus::Inactive),
            "lead" => Ok(ContactStatus::Lead),
            "qualified" => Ok(ContactStatus::Qualified),
            "converted" => Ok(ContactStatus::Converted),
            other => Err(format!("Estado de contacto inválido: {}", other)),
        }
    }
}

// --- ESTRUTURAS AUXILIARES ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
    #[schema(example = "USD")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AreaRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactPreferences {
    #[serde(default)]
    pub property_type: Vec<String>,
    #[serde(default)]
    pub location: Vec<String>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub area: Option<AreaRange>,
}

// --- CONTATO (leitura) ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,

    #[serde(rename = "type", default)]
    pub contact_type: ContactType,
    #[serde(default)]
    pub status: ContactStatus,

    pub company: Option<String>,
    pub position: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
    pub source: Option<String>,

    // Vêm do backend como texto JSON
    #[serde(default, deserialize_with = "json_string::deserialize")]
    pub budget: Option<Budget>,
    #[serde(default, deserialize_with = "json_string::deserialize")]
    pub preferences: Option<ContactPreferences>,
    #[serde(default, deserialize_with = "json_string::deserialize")]
    pub tags: Vec<String>,

    pub assigned_to: Option<String>,
    pub last_contact: Option<DateTime<Utc>>,
    pub next_follow_up: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

// --- CONTATO (escrita) ---
// Serializado para o backend: budget/preferences/tags viram strings JSON.

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    #[validate(length(min = 1, message = "El nombre es obligatorio"))]
    #[schema(example = "María")]
    pub first_name: String,

    #[validate(length(min = 1, message = "El apellido es obligatorio"))]
    #[schema(example = "González")]
    pub last_name: String,

    #[validate(email(message = "El email no es válido"))]
    #[schema(example = "maria@correo.com")]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    #[serde(rename = "type", default)]
    pub contact_type: ContactType,
    #[serde(default)]
    pub status: ContactStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "json_string::serialize"
    )]
    pub budget: Option<Budget>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "json_string::serialize"
    )]
    pub preferences: Option<ContactPreferences>,
    #[serde(default, serialize_with = "json_string::serialize")]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_follow_up: Option<DateTime<Utc>>,
}

impl ContactInput {
    /// Remove espaços antes de validar: "   " não conta como nome.
    pub fn trimmed(mut self) -> Self {
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self
    }
}
