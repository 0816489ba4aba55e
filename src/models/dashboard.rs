// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::developments::Development;

// Contagem + percentual de um discriminante (status, tipo...)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TypeStat {
    #[schema(example = "available")]
    pub key: String,
    pub count: usize,
    #[schema(example = 42.5)]
    pub percentage: f64,
}

// 1. Empreendimentos (os cards do topo)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentSummary {
    pub total: usize,
    pub available: usize,
    pub sold: usize,
    pub reserved: usize,
    pub by_status: Vec<TypeStat>,
    pub by_type: Vec<TypeStat>,
    pub total_value: Decimal,
    /// Criados nos últimos 7 dias
    pub recent: usize,
    /// Top 3 por visualizações
    pub top_viewed: Vec<Development>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitSummary {
    pub total: usize,
    pub by_status: Vec<TypeStat>,
    pub by_type: Vec<TypeStat>,
    pub available_value: Decimal,
    pub sold_value: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationSummary {
    pub total: usize,
    pub by_status: Vec<TypeStat>,
    /// Sinal somado das reservas pendentes/confirmadas
    pub held_amount: Decimal,
    pub total_value: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuotaSummary {
    pub total: usize,
    pub by_status: Vec<TypeStat>,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub outstanding_amount: Decimal,
    pub overdue_count: usize,
    pub overdue_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactSummary {
    pub total: usize,
    pub by_type: Vec<TypeStat>,
    pub by_status: Vec<TypeStat>,
    pub recent: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub developments: DevelopmentSummary,
    pub units: UnitSummary,
    pub reservations: ReservationSummary,
    pub quotas: QuotaSummary,
    pub contacts: ContactSummary,
}
