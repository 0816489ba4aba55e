// src/services/finance_service.rs

use std::sync::Arc;

use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;
use validator::Validate;

use crate::{
    client::QuotaGateway,
    common::error::AppError,
    models::{
        common::{BatchItemResult, EntityId},
        finance::{
            AmountType, CreateQuotaPayload, DevelopmentQuota, PlanFrequency, PlanPreview,
            PlanReport, PlanRequest, QuotaInput, QuotaStatus,
        },
    },
};

#[derive(Clone)]
pub struct FinanceService {
    quotas: Arc<dyn QuotaGateway>,
}

impl FinanceService {
    pub fn new(quotas: Arc<dyn QuotaGateway>) -> Self {
        Self { quotas }
    }

    /// Cria uma cuota avulsa: valida e faz exatamente uma chamada ao backend.
    pub async fn create_quota(&self, payload: CreateQuotaPayload) -> Result<DevelopmentQuota, AppError> {
        let payload = payload.trimmed();
        payload.validate()?;
        let input = quota_input_from_payload(payload)?;
        self.quotas.create_quota(&input).await
    }

    /// Só calcula; nada é enviado ao backend.
    pub fn preview_plan(&self, request: &PlanRequest) -> Result<PlanPreview, AppError> {
        preview_plan(request)
    }

    /// Gera o plano criando as cuotas uma a uma, em ordem.
    ///
    /// Não é transacional: na primeira falha o lote para, as já criadas ficam
    /// no backend e as seguintes nunca são tentadas.
    pub async fn generate_plan(&self, request: &PlanRequest) -> Result<PlanReport, AppError> {
        let drafts = build_plan(request)?;
        let batch_id = Uuid::new_v4();
        let requested = drafts.len();

        tracing::info!("📅 Plano {}: gerando {} cuotas", batch_id, requested);

        let mut results = Vec::with_capacity(requested);
        let mut created = Vec::with_capacity(requested);

        for (position, draft) in drafts.iter().enumerate() {
            let index = position + 1;
            match self.quotas.create_quota(draft).await {
                Ok(quota) => {
                    results.push(BatchItemResult::ok(index));
                    created.push(quota);
                }
                Err(e) => {
                    tracing::error!(
                        "🔥 Plano {}: cuota {}/{} falhou, interrompendo: {}",
                        batch_id, index, requested, e
                    );
                    results.push(BatchItemResult::failed(index, e.user_message()));
                    break;
                }
            }
        }

        let completed = created.len() == requested;
        if completed {
            tracing::info!("✅ Plano {}: {} cuotas criadas", batch_id, requested);
        }

        Ok(PlanReport {
            batch_id,
            requested,
            created_count: created.len(),
            completed,
            results,
            quotas: created,
        })
    }
}

// =========================================================================
//  CÁLCULO DO PLANO (puro)
// =========================================================================

fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Valor estimado por cuota, como aparece na pré-visualização.
pub fn installment_amount(amount_type: AmountType, amount: Decimal, installments: u32) -> Decimal {
    match amount_type {
        AmountType::PerInstallment => amount,
        AmountType::Total => round_currency(amount / Decimal::from(installments.max(1))),
    }
}

/// Valores de cada cuota. No modo "total" a sobra do arredondamento vai para a última,
/// então a soma bate exatamente com o valor informado.
pub fn installment_amounts(amount_type: AmountType, amount: Decimal, installments: u32) -> Vec<Decimal> {
    let n = installments as usize;
    if n == 0 {
        return Vec::new();
    }
    let share = installment_amount(amount_type, amount, installments);
    let mut amounts = vec![share; n];
    if amount_type == AmountType::Total {
        let allocated = share * Decimal::from(installments - 1);
        amounts[n - 1] = amount - allocated;
    }
    amounts
}

/// Vencimento da cuota `index` (1..=N): primeiro vencimento + (index-1) períodos.
/// Sempre calculado a partir do primeiro vencimento; dia 31 vira o último dia do mês curto.
pub fn due_date_for(first_due_date: NaiveDate, frequency: PlanFrequency, index: u32) -> Option<NaiveDate> {
    let months = frequency.months() * index.saturating_sub(1);
    first_due_date.checked_add_months(Months::new(months))
}

pub fn parse_due_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::BusinessRule(format!("Fecha de vencimiento inválida: {}", raw.trim())))
}

fn required_id(value: &Option<EntityId>, message: &str) -> Result<EntityId, AppError> {
    value.clone().ok_or_else(|| AppError::BusinessRule(message.to_string()))
}

/// Valida as pré-condições e monta as N cuotas. Nenhuma chamada de rede.
pub fn build_plan(request: &PlanRequest) -> Result<Vec<QuotaInput>, AppError> {
    request.validate()?;

    let development_id = required_id(&request.development_id, "Seleccione un desarrollo")?;
    let unit_id = required_id(&request.unit_id, "Seleccione una unidad")?;
    let currency_id = required_id(&request.currency_id, "Seleccione una moneda")?;
    let first_due_date = parse_due_date(&request.first_due_date)?;

    let total = request.installments;
    let amounts = installment_amounts(request.amount_type, request.amount, total);

    amounts
        .into_iter()
        .enumerate()
        .map(|(position, amount)| {
            let index = position as u32 + 1;
            let due_date = due_date_for(first_due_date, request.frequency, index)
                .ok_or_else(|| AppError::BusinessRule("Fecha de vencimiento fuera de rango".to_string()))?;

            Ok(QuotaInput {
                development_id: development_id.clone(),
                unit_id: unit_id.clone(),
                quota_number: format!("PLAN-{}/{}", index, total),
                quota_name: format!("Cuota {} de {}", index, total),
                quota_type: request.frequency.quota_type(),
                status: QuotaStatus::Pending,
                amount,
                paid_amount: None,
                discount_amount: None,
                currency_id: currency_id.clone(),
                due_date,
                description: request.description.clone(),
                notes: request.notes.clone(),
                active: true,
            })
        })
        .collect()
}

pub fn preview_plan(request: &PlanRequest) -> Result<PlanPreview, AppError> {
    let quotas = build_plan(request)?;
    let total_amount = quotas.iter().fold(Decimal::ZERO, |acc, q| acc + q.amount);
    Ok(PlanPreview {
        installments: request.installments,
        installment_amount: installment_amount(request.amount_type, request.amount, request.installments),
        total_amount,
        quotas,
    })
}

fn quota_input_from_payload(payload: CreateQuotaPayload) -> Result<QuotaInput, AppError> {
    let development_id = required_id(&payload.development_id, "Seleccione un desarrollo")?;
    let unit_id = required_id(&payload.unit_id, "Seleccione una unidad")?;
    let currency_id = required_id(&payload.currency_id, "Seleccione una moneda")?;
    let due_date = payload
        .due_date
        .ok_or_else(|| AppError::BusinessRule("La fecha de vencimiento es obligatoria".to_string()))?;

    Ok(QuotaInput {
        development_id,
        unit_id,
        quota_number: payload.quota_number,
        quota_name: payload.quota_name,
        quota_type: payload.quota_type,
        status: payload.status,
        amount: payload.amount,
        paid_amount: payload.paid_amount,
        discount_amount: payload.discount_amount,
        currency_id,
        due_date,
        description: payload.description,
        notes: payload.notes,
        active: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::models::finance::QuotaType;

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    fn request(amount_type: AmountType, amount: Decimal, installments: u32, frequency: PlanFrequency, first: &str) -> PlanRequest {
        PlanRequest {
            development_id: Some(EntityId::Number(1)),
            unit_id: Some(EntityId::Number(10)),
            currency_id: Some(EntityId::Text("USD".into())),
            amount_type,
            amount,
            installments,
            frequency,
            first_due_date: first.to_string(),
            description: None,
            notes: None,
        }
    }

    // Gateway falso: grava as chamadas e falha a partir de uma posição
    struct FakeQuotas {
        calls: Mutex<Vec<QuotaInput>>,
        fail_at: Option<usize>,
    }

    impl FakeQuotas {
        fn new(fail_at: Option<usize>) -> Self {
            Self { calls: Mutex::new(Vec::new()), fail_at }
        }
    }

    #[async_trait]
    impl QuotaGateway for FakeQuotas {
        async fn create_quota(&self, input: &QuotaInput) -> Result<DevelopmentQuota, AppError> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(input.clone());
            let position = calls.len();
            if Some(position) == self.fail_at {
                return Err(AppError::Backend { status: 500, message: "Error al crear la cuota".into() });
            }
            Ok(DevelopmentQuota {
                id: EntityId::Number(position as i64),
                development_id: input.development_id.clone(),
                unit_id: Some(input.unit_id.clone()),
                quota_number: input.quota_number.clone(),
                quota_name: input.quota_name.clone(),
                quota_type: input.quota_type,
                status: input.status,
                amount: input.amount,
                paid_amount: None,
                discount_amount: None,
                currency_id: Some(input.currency_id.clone()),
                due_date: input.due_date,
                description: None,
                notes: None,
                active: Some(true),
            })
        }
    }

    #[test]
    fn twelve_monthly_installments_of_one_hundred() {
        let plan = build_plan(&request(AmountType::Total, Decimal::from(1200), 12, PlanFrequency::Monthly, "2024-01-10")).unwrap();

        assert_eq!(plan.len(), 12);
        for (i, quota) in plan.iter().enumerate() {
            let n = i + 1;
            assert_eq!(quota.amount, Decimal::from(100));
            assert_eq!(quota.due_date, date(&format!("2024-{:02}-10", n)));
            assert_eq!(quota.quota_number, format!("PLAN-{}/12", n));
            assert_eq!(quota.quota_name, format!("Cuota {} de 12", n));
            assert_eq!(quota.quota_type, QuotaType::Monthly);
            assert_eq!(quota.status, QuotaStatus::Pending);
            assert!(quota.active);
        }
    }

    #[test]
    fn count_matches_requested_installments() {
        for n in [1u32, 2, 7, 36, 120] {
            let plan = build_plan(&request(AmountType::PerInstallment, Decimal::from(50), n, PlanFrequency::Monthly, "2024-05-31")).unwrap();
            assert_eq!(plan.len(), n as usize);
        }
    }

    #[test]
    fn per_installment_amount_is_copied_exactly() {
        let amount = Decimal::new(33333, 2);
        let plan = build_plan(&request(AmountType::PerInstallment, amount, 5, PlanFrequency::Quarterly, "2024-01-01")).unwrap();
        assert!(plan.iter().all(|q| q.amount == amount));
    }

    #[test]
    fn total_split_absorbs_rounding_in_the_last_installment() {
        let plan = build_plan(&request(AmountType::Total, Decimal::from(1000), 3, PlanFrequency::Monthly, "2024-01-01")).unwrap();
        let amounts: Vec<Decimal> = plan.iter().map(|q| q.amount).collect();
        assert_eq!(amounts, vec![Decimal::new(33333, 2), Decimal::new(33333, 2), Decimal::new(33334, 2)]);

        let sum: Decimal = amounts.iter().copied().sum();
        assert_eq!(sum, Decimal::from(1000));

        let preview = preview_plan(&request(AmountType::Total, Decimal::from(1000), 3, PlanFrequency::Monthly, "2024-01-01")).unwrap();
        assert_eq!(preview.installment_amount, Decimal::new(33333, 2));
        assert_eq!(preview.total_amount, Decimal::from(1000));
    }

    #[test]
    fn total_split_stays_within_a_cent_per_installment() {
        let amount = Decimal::new(1_000_001, 2);
        let n = 7u32;
        let share = installment_amount(AmountType::Total, amount, n);
        let plan = build_plan(&request(AmountType::Total, amount, n, PlanFrequency::Annual, "2024-02-29")).unwrap();
        let sum: Decimal = plan.iter().map(|q| q.amount).sum();
        assert_eq!(sum, amount);
        for quota in &plan {
            assert!((quota.amount - share).abs() <= Decimal::new(1, 2) * Decimal::from(n));
        }
    }

    #[test]
    fn due_dates_advance_by_the_frequency() {
        let quarterly = build_plan(&request(AmountType::PerInstallment, Decimal::ONE, 4, PlanFrequency::Quarterly, "2024-01-15")).unwrap();
        let dates: Vec<NaiveDate> = quarterly.iter().map(|q| q.due_date).collect();
        assert_eq!(dates, vec![date("2024-01-15"), date("2024-04-15"), date("2024-07-15"), date("2024-10-15")]);
        assert!(quarterly.iter().all(|q| q.quota_type == QuotaType::Quarterly));

        let annual = build_plan(&request(AmountType::PerInstallment, Decimal::ONE, 3, PlanFrequency::Annual, "2024-03-01")).unwrap();
        let dates: Vec<NaiveDate> = annual.iter().map(|q| q.due_date).collect();
        assert_eq!(dates, vec![date("2024-03-01"), date("2025-03-01"), date("2026-03-01")]);
    }

    #[test]
    fn month_end_clamps_to_the_last_day() {
        let plan = build_plan(&request(AmountType::PerInstallment, Decimal::ONE, 4, PlanFrequency::Monthly, "2024-01-31")).unwrap();
        let dates: Vec<NaiveDate> = plan.iter().map(|q| q.due_date).collect();
        // calculado sempre a partir do primeiro vencimento: março volta ao dia 31
        assert_eq!(dates, vec![date("2024-01-31"), date("2024-02-29"), date("2024-03-31"), date("2024-04-30")]);

        for pair in dates.windows(2) {
            assert!(pair[0] < pair[1]);
        }

        let leap = due_date_for(date("2024-02-29"), PlanFrequency::Annual, 2).unwrap();
        assert_eq!(leap, date("2025-02-28"));
    }

    #[test]
    fn preconditions_fail_before_generation() {
        let mut missing_unit = request(AmountType::Total, Decimal::from(100), 2, PlanFrequency::Monthly, "2024-01-01");
        missing_unit.unit_id = None;
        assert!(matches!(build_plan(&missing_unit), Err(AppError::ValidationError(_))));

        let zero_amount = request(AmountType::Total, Decimal::ZERO, 2, PlanFrequency::Monthly, "2024-01-01");
        assert!(matches!(build_plan(&zero_amount), Err(AppError::ValidationError(_))));

        let no_installments = request(AmountType::Total, Decimal::from(100), 0, PlanFrequency::Monthly, "2024-01-01");
        assert!(matches!(build_plan(&no_installments), Err(AppError::ValidationError(_))));

        let empty_date = request(AmountType::Total, Decimal::from(100), 2, PlanFrequency::Monthly, "");
        assert!(matches!(build_plan(&empty_date), Err(AppError::ValidationError(_))));

        let bad_date = request(AmountType::Total, Decimal::from(100), 2, PlanFrequency::Monthly, "10/01/2024");
        assert!(matches!(build_plan(&bad_date), Err(AppError::BusinessRule(_))));
    }

    #[tokio::test]
    async fn invalid_plan_makes_no_backend_calls() {
        let fake = Arc::new(FakeQuotas::new(None));
        let service = FinanceService::new(fake.clone());

        let mut req = request(AmountType::Total, Decimal::from(100), 2, PlanFrequency::Monthly, "2024-01-01");
        req.currency_id = None;

        assert!(service.generate_plan(&req).await.is_err());
        assert!(fake.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn generation_is_sequential_and_complete() {
        let fake = Arc::new(FakeQuotas::new(None));
        let service = FinanceService::new(fake.clone());

        let report = service
            .generate_plan(&request(AmountType::Total, Decimal::from(1200), 12, PlanFrequency::Monthly, "2024-01-10"))
            .await
            .unwrap();

        assert!(report.completed);
        assert_eq!(report.created_count, 12);
        assert_eq!(report.results.len(), 12);
        assert!(report.results.iter().all(|r| r.success));

        let numbers: Vec<String> = fake.calls.lock().unwrap().iter().map(|q| q.quota_number.clone()).collect();
        let expected: Vec<String> = (1..=12).map(|i| format!("PLAN-{}/12", i)).collect();
        assert_eq!(numbers, expected);
    }

    #[tokio::test]
    async fn generation_stops_at_the_first_failure() {
        let fake = Arc::new(FakeQuotas::new(Some(3)));
        let service = FinanceService::new(fake.clone());

        let report = service
            .generate_plan(&request(AmountType::PerInstallment, Decimal::from(250), 6, PlanFrequency::Monthly, "2024-01-10"))
            .await
            .unwrap();

        assert!(!report.completed);
        assert_eq!(report.requested, 6);
        assert_eq!(report.created_count, 2);
        assert_eq!(report.quotas.len(), 2);
        assert_eq!(
            report.results,
            vec![
                BatchItemResult::ok(1),
                BatchItemResult::ok(2),
                BatchItemResult::failed(3, "Error al crear la cuota"),
            ]
        );
        // a 4ª em diante nunca foi tentada
        assert_eq!(fake.calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn single_quota_requires_unit() {
        let fake = Arc::new(FakeQuotas::new(None));
        let service = FinanceService::new(fake.clone());

        let payload = CreateQuotaPayload {
            development_id: Some(EntityId::Number(1)),
            unit_id: None,
            currency_id: Some(EntityId::Number(1)),
            quota_number: "Q-1".into(),
            quota_name: "Entrega inicial".into(),
            quota_type: QuotaType::Initial,
            status: QuotaStatus::Pending,
            amount: Decimal::from(5000),
            paid_amount: None,
            discount_amount: None,
            due_date: Some(date("2024-06-01")),
            description: None,
            notes: None,
        };

        let err = service.create_quota(payload.clone()).await.unwrap_err();
        assert_eq!(err.user_message(), "Seleccione una unidad");
        assert!(fake.calls.lock().unwrap().is_empty());

        let ok = CreateQuotaPayload { unit_id: Some(EntityId::Number(4)), ..payload };
        let quota = service.create_quota(ok).await.unwrap();
        assert_eq!(quota.quota_type, QuotaType::Initial);
        assert_eq!(fake.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn installments_are_capped_at_six_hundred() {
        let longest = request(AmountType::PerInstallment, Decimal::from(10), 600, PlanFrequency::Monthly, "2024-01-31");
        let plan = build_plan(&longest).unwrap();
        assert_eq!(plan.len(), 600);
        assert_eq!(plan[599].due_date, date("2073-12-31"));

        let too_long = request(AmountType::PerInstallment, Decimal::from(10), 601, PlanFrequency::Monthly, "2024-01-31");
        let err = build_plan(&too_long).unwrap_err();
        assert_eq!(err.user_message(), "El plan debe tener entre 1 y 600 cuotas");
    }

    #[tokio::test]
    async fn oversized_plan_makes_no_backend_calls() {
        let fake = Arc::new(FakeQuotas::new(None));
        let service = FinanceService::new(fake.clone());

        let req = request(AmountType::Total, Decimal::from(100_000), 1_000_000, PlanFrequency::Monthly, "2024-01-01");
        assert!(matches!(service.generate_plan(&req).await, Err(AppError::ValidationError(_))));
        assert!(fake.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_quota_name_is_rejected_before_sending() {
        let fake = Arc::new(FakeQuotas::new(None));
        let service = FinanceService::new(fake.clone());

        let payload = CreateQuotaPayload {
            development_id: Some(EntityId::Number(1)),
            unit_id: Some(EntityId::Number(4)),
            currency_id: Some(EntityId::Number(1)),
            quota_number: " Q-1 ".into(),
            quota_name: "   ".into(),
            quota_type: QuotaType::Initial,
            status: QuotaStatus::Pending,
            amount: Decimal::from(5000),
            paid_amount: None,
            discount_amount: None,
            due_date: Some(date("2024-06-01")),
            description: None,
            notes: None,
        };

        let err = service.create_quota(payload).await.unwrap_err();
        assert_eq!(err.user_message(), "El nombre de la cuota es obligatorio");
        assert!(fake.calls.lock().unwrap().is_empty());
    }
}
