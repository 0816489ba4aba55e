// src/services/dashboard_service.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::{
    client::{ContactRepository, DevelopmentRepository, QuotaRepository, ReservationRepository, UnitRepository},
    common::error::AppError,
    models::{
        crm::Contact,
        dashboard::{
            ContactSummary, DashboardOverview, DevelopmentSummary, QuotaSummary, ReservationSummary, UnitSummary,
        },
        developments::{Development, DevelopmentStatus},
        finance::{DevelopmentQuota, QuotaStatus},
        inventory::{DevelopmentUnit, UnitStatus},
        operations::DevelopmentReservation,
    },
    services::stats::{self, TOP_LIMIT},
};

#[derive(Clone)]
pub struct DashboardService {
    developments: DevelopmentRepository,
    units: UnitRepository,
    reservations: ReservationRepository,
    quotas: QuotaRepository,
    contacts: ContactRepository,
}

impl DashboardService {
    pub fn new(
        developments: DevelopmentRepository,
        units: UnitRepository,
        reservations: ReservationRepository,
        quotas: QuotaRepository,
        contacts: ContactRepository,
    ) -> Self {
        Self { developments, units, reservations, quotas, contacts }
    }

    /// Carrega tudo em paralelo e recalcula os cards. Nada fica em cache.
    pub async fn overview(&self) -> Result<DashboardOverview, AppError> {
        let (developments, units, reservations, quotas, contacts) = tokio::try_join!(
            self.developments.list(),
            self.units.list(),
            self.reservations.list_all(),
            self.quotas.list_all(),
            self.contacts.list_all(),
        )?;

        let now = Utc::now();
        tracing::debug!(
            "📊 Dashboard: {} empreendimentos, {} unidades, {} reservas, {} cuotas, {} contatos",
            developments.len(), units.len(), reservations.len(), quotas.len(), contacts.len()
        );

        Ok(DashboardOverview {
            developments: summarize_developments(&developments, now),
            units: summarize_units(&units),
            reservations: summarize_reservations(&reservations),
            quotas: summarize_quotas(&quotas, now.date_naive()),
            contacts: summarize_contacts(&contacts, now),
        })
    }
}

// =========================================================================
//  RESUMOS (puros)
// =========================================================================

pub fn summarize_developments(items: &[Development], now: DateTime<Utc>) -> DevelopmentSummary {
    let with_status = |status: DevelopmentStatus| items.iter().filter(|d| d.status == Some(status)).count();

    DevelopmentSummary {
        total: items.len(),
        available: with_status(DevelopmentStatus::Available),
        sold: with_status(DevelopmentStatus::Sold),
        reserved: with_status(DevelopmentStatus::Reserved),
        by_status: stats::type_stats(items, |d| {
            d.status.map(|s| s.as_str()).unwrap_or("unknown").to_string()
        }),
        by_type: stats::type_stats(items, |d| {
            d.development_type.map(|t| t.as_str()).unwrap_or("unknown").to_string()
        }),
        total_value: stats::sum_by(items, |d| d.price),
        recent: stats::recent_count(items, |d| d.created_at, now),
        top_viewed: stats::top_by(items, |d| d.views.unwrap_or(0), TOP_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
    }
}

pub fn summarize_units(items: &[DevelopmentUnit]) -> UnitSummary {
    let value_with = |status: UnitStatus| {
        stats::sum_by(items, |u| (u.status == status).then_some(u.price))
    };

    UnitSummary {
        total: items.len(),
        by_status: stats::type_stats(items, |u| u.status.as_str().to_string()),
        by_type: stats::type_stats(items, |u| u.unit_type.as_str().to_string()),
        available_value: value_with(UnitStatus::Available),
        sold_value: value_with(UnitStatus::Sold),
    }
}

pub fn summarize_reservations(items: &[DevelopmentReservation]) -> ReservationSummary {
    ReservationSummary {
        total: items.len(),
        by_status: stats::type_stats(items, |r| r.status.as_str().to_string()),
        held_amount: stats::sum_by(items, |r| r.status.is_holding().then_some(r.reservation_amount)),
        total_value: stats::sum_by(items, |r| Some(r.total_price)),
    }
}

fn paid_of(quota: &DevelopmentQuota) -> Decimal {
    match (quota.paid_amount, quota.status) {
        (Some(paid), _) => paid,
        (None, QuotaStatus::Paid) => quota.amount,
        (None, _) => Decimal::ZERO,
    }
}

/// O que ainda falta receber de uma cuota aberta (nunca negativo).
fn remaining_of(quota: &DevelopmentQuota) -> Decimal {
    if !quota.status.is_open() {
        return Decimal::ZERO;
    }
    let discount = quota.discount_amount.unwrap_or(Decimal::ZERO);
    (quota.amount - paid_of(quota) - discount).max(Decimal::ZERO)
}

/// Vencida: marcada como OVERDUE ou ainda aberta com vencimento anterior a `today`.
fn is_overdue(quota: &DevelopmentQuota, today: NaiveDate) -> bool {
    quota.status == QuotaStatus::Overdue || (quota.status.is_open() && quota.due_date < today)
}

pub fn summarize_quotas(items: &[DevelopmentQuota], today: NaiveDate) -> QuotaSummary {
    let overdue: Vec<&DevelopmentQuota> = items.iter().filter(|q| is_overdue(q, today)).collect();

    QuotaSummary {
        total: items.len(),
        by_status: stats::type_stats(items, |q| q.status.as_str().to_string()),
        total_amount: stats::sum_by(items, |q| Some(q.amount)),
        paid_amount: stats::sum_by(items, |q| Some(paid_of(q))),
        outstanding_amount: stats::sum_by(items, |q| Some(remaining_of(q))),
        overdue_count: overdue.len(),
        overdue_amount: overdue.iter().fold(Decimal::ZERO, |acc, q| acc + remaining_of(q)),
    }
}

pub fn summarize_contacts(items: &[Contact], now: DateTime<Utc>) -> ContactSummary {
    ContactSummary {
        total: items.len(),
        by_type: stats::type_stats(items, |c| c.contact_type.as_str().to_string()),
        by_status: stats::type_stats(items, |c| c.status.as_str().to_string()),
        recent: stats::recent_count(items, |c| c.created_at, now),
    }
}
