// src/models/operations.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::common::EntityId;

// --- Reservas de Unidades ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Expired,
    Converted,
    Refunded,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::Cancelled => "CANCELLED",
            ReservationStatus::Expired => "EXPIRED",
            ReservationStatus::Converted => "CONVERTED",
            ReservationStatus::Refunded => "REFUNDED",
        }
    }

    /// Reserva que ainda segura a unidade.
    pub fn is_holding(&self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Confirmed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentReservation {
    pub id: EntityId,
    pub development_id: EntityId,
    pub unit_id: Option<EntityId>,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub client_document: Option<String>,
    pub status: ReservationStatus,
    pub reservation_amount: Decimal,
    pub total_price: Decimal,
    pub reservation_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub agent_name: Option<String>,
    pub payment_method: Option<String>,
    pub payment_reference: Option<String>,
    pub notes: Option<String>,
    pub reservation_number: Option<String>,
}

/// O que a UI manda. Datas são opcionais: o serviço completa os padrões.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationPayload {
    #[validate(required(message = "Seleccione un desarrollo"))]
    pub development_id: Option<EntityId>,
    pub unit_id: Option<EntityId>,

    #[validate(length(min = 1, message = "El nombre del cliente es obligatorio"))]
    #[schema(example = "Carlos Benítez")]
    pub client_name: String,

    #[validate(email(message = "El email del cliente no es válido"))]
    #[schema(example = "carlos@correo.com")]
    pub client_email: String,
    pub client_phone: Option<String>,
    pub client_document: Option<String>,

    #[serde(default)]
    pub status: ReservationStatus,

    #[validate(custom(function = "crate::models::finance::validate_positive"))]
    pub reservation_amount: Decimal,
    #[validate(custom(function = "crate::models::finance::validate_positive"))]
    pub total_price: Decimal,

    #[schema(value_type = Option<String>, format = Date, example = "2024-03-01")]
    pub reservation_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date, example = "2024-03-08")]
    pub expiration_date: Option<NaiveDate>,

    pub agent_name: Option<String>,
    pub payment_method: Option<String>,
    pub payment_reference: Option<String>,
    pub notes: Option<String>,
}

impl CreateReservationPayload {
    pub fn trimmed(mut self) -> Self {
        self.client_name = self.client_name.trim().to_string();
        self.client_email = self.client_email.trim().to_lowercase();
        self
    }
}

/// Corpo enviado ao backend, já com as datas resolvidas.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationInput {
    pub development_id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<EntityId>,
    pub client_name: String,
    pub client_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_document: Option<String>,
    pub status: ReservationStatus,
    pub reservation_amount: Decimal,
    pub total_price: Decimal,
    pub reservation_date: NaiveDate,
    pub expiration_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
