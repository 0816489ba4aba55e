// src/models/finance.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::common::{BatchItemResult, EntityId};

// ---
// Validação Customizada
// ---
pub fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("El monto debe ser mayor a cero".into());
        return Err(err);
    }
    Ok(())
}

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuotaType {
    Initial,
    Monthly,
    Quarterly,
    Annual,
    Final,
    Special,
    Maintenance,
    Insurance,
    Taxes,
}

impl QuotaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotaType::Initial => "INITIAL",
            QuotaType::Monthly => "MONTHLY",
            QuotaType::Quarterly => "QUARTERLY",
            QuotaType::Annual => "ANNUAL",
            QuotaType::Final => "FINAL",
            QuotaType::Special => "SPECIAL",
            QuotaType::Maintenance => "MAINTENANCE",
            QuotaType::Insurance => "INSURANCE",
            QuotaType::Taxes => "TAXES",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuotaStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
    Cancelled,
    Partial,
    Refunded,
}

impl QuotaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotaStatus::Pending => "PENDING",
            QuotaStatus::Paid => "PAID",
            QuotaStatus::Overdue => "OVERDUE",
            QuotaStatus::Cancelled => "CANCELLED",
            QuotaStatus::Partial => "PARTIAL",
            QuotaStatus::Refunded => "REFUNDED",
        }
    }

    /// Ainda há algo a receber.
    pub fn is_open(&self) -> bool {
        matches!(self, QuotaStatus::Pending | QuotaStatus::Partial | QuotaStatus::Overdue)
    }
}

// --- Cuotas ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentQuota {
    pub id: EntityId,
    pub development_id: EntityId,
    pub unit_id: Option<EntityId>,
    #[schema(example = "PLAN-1/12")]
    pub quota_number: String,
    #[schema(example = "Cuota 1 de 12")]
    pub quota_name: String,
    #[serde(rename = "type")]
    pub quota_type: QuotaType,
    pub status: QuotaStatus,
    pub amount: Decimal,
    pub paid_amount: Option<Decimal>,
    pub discount_amount: Option<Decimal>,
    pub currency_id: Option<EntityId>,
    #[schema(value_type = String, format = Date, example = "2024-01-10")]
    pub due_date: NaiveDate,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub active: Option<bool>,
}

/// Corpo de criação enviado ao backend.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuotaInput {
    pub development_id: EntityId,
    pub unit_id: EntityId,
    pub quota_number: String,
    pub quota_name: String,
    #[serde(rename = "type")]
    pub quota_type: QuotaType,
    pub status: QuotaStatus,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<Decimal>,
    pub currency_id: EntityId,
    #[schema(value_type = String, format = Date)]
    pub due_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuotaPayload {
    #[validate(required(message = "Seleccione un desarrollo"))]
    pub development_id: Option<EntityId>,
    #[validate(required(message = "Seleccione una unidad"))]
    pub unit_id: Option<EntityId>,
    #[validate(required(message = "Seleccione una moneda"))]
    pub currency_id: Option<EntityId>,

    #[validate(length(min = 1, message = "El número de cuota es obligatorio"))]
    pub quota_number: String,
    #[validate(length(min = 1, message = "El nombre de la cuota es obligatorio"))]
    pub quota_name: String,

    #[serde(rename = "type")]
    pub quota_type: QuotaType,
    #[serde(default)]
    pub status: QuotaStatus,

    #[validate(custom(function = "validate_positive"))]
    pub amount: Decimal,
    pub paid_amount: Option<Decimal>,
    pub discount_amount: Option<Decimal>,

    #[validate(required(message = "La fecha de vencimiento es obligatoria"))]
    #[schema(value_type = Option<String>, format = Date, example = "2024-01-10")]
    pub due_date: Option<NaiveDate>,

    pub description: Option<String>,
    pub notes: Option<String>,
}

impl CreateQuotaPayload {
    pub fn trimmed(mut self) -> Self {
        self.quota_number = self.quota_number.trim().to_string();
        self.quota_name = self.quota_name.trim().to_string();
        self
    }
}

// --- Plano de Cuotas ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum AmountType {
    /// Cada cuota recebe exatamente o valor informado.
    PerInstallment,
    /// O valor é dividido entre as cuotas.
    Total,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanFrequency {
    Monthly,
    Quarterly,
    Annual,
}

impl PlanFrequency {
    pub fn months(self) -> u32 {
        match self {
            PlanFrequency::Monthly => 1,
            PlanFrequency::Quarterly => 3,
            PlanFrequency::Annual => 12,
        }
    }

    pub fn quota_type(self) -> QuotaType {
        match self {
            PlanFrequency::Monthly => QuotaType::Monthly,
            PlanFrequency::Quarterly => QuotaType::Quarterly,
            PlanFrequency::Annual => QuotaType::Annual,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    #[validate(required(message = "Seleccione un desarrollo"))]
    pub development_id: Option<EntityId>,
    #[validate(required(message = "Seleccione una unidad"))]
    pub unit_id: Option<EntityId>,
    #[validate(required(message = "Seleccione una moneda"))]
    pub currency_id: Option<EntityId>,

    pub amount_type: AmountType,

    #[validate(custom(function = "validate_positive"))]
    #[schema(example = 1200)]
    pub amount: Decimal,

    // 600 = 50 anos de cuotas mensais; cada cuota é um POST sequencial
    #[validate(range(min = 1, max = 600, message = "El plan debe tener entre 1 y 600 cuotas"))]
    #[schema(example = 12, minimum = 1, maximum = 600)]
    pub installments: u32,

    pub frequency: PlanFrequency,

    #[validate(length(min = 1, message = "La fecha del primer vencimiento es obligatoria"))]
    #[schema(example = "2024-01-10")]
    pub first_due_date: String,

    pub description: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanPreview {
    pub installments: u32,
    /// Valor estimado por cuota (arredondado a 2 casas).
    pub installment_amount: Decimal,
    pub total_amount: Decimal,
    pub quotas: Vec<QuotaInput>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport {
    pub batch_id: Uuid,
    pub requested: usize,
    pub created_count: usize,
    pub completed: bool,
    pub results: Vec<BatchItemResult>,
    pub quotas: Vec<DevelopmentQuota>,
}
