// src/services/operation_service.rs

use chrono::{Days, NaiveDate, Utc};
use validator::Validate;

use crate::{
    client::ReservationRepository,
    common::error::AppError,
    models::operations::{CreateReservationPayload, DevelopmentReservation, ReservationInput},
};

/// Validade padrão de uma reserva sem data de expiração.
pub const DEFAULT_RESERVATION_DAYS: u64 = 7;

#[derive(Clone)]
pub struct OperationService {
    reservations: ReservationRepository,
}

impl OperationService {
    pub fn new(reservations: ReservationRepository) -> Self {
        Self { reservations }
    }

    pub async fn create_reservation(
        &self,
        payload: CreateReservationPayload,
    ) -> Result<DevelopmentReservation, AppError> {
        let input = prepare_reservation(payload, Utc::now().date_naive())?;

        tracing::info!(
            "📝 Reserva para {} ({} → {})",
            input.client_email, input.reservation_date, input.expiration_date
        );

        self.reservations.create(&input).await
    }
}

/// Valida e completa as datas: hoje como data da reserva e +7 dias como expiração.
/// Só datas, sem hora.
pub fn prepare_reservation(
    payload: CreateReservationPayload,
    today: NaiveDate,
) -> Result<ReservationInput, AppError> {
    let payload = payload.trimmed();
    payload.validate()?;

    let development_id = payload
        .development_id
        .ok_or_else(|| AppError::BusinessRule("Seleccione un desarrollo".to_string()))?;

    let reservation_date = payload.reservation_date.unwrap_or(today);
    let expiration_date = match payload.expiration_date {
        Some(date) => date,
        None => reservation_date
            .checked_add_days(Days::new(DEFAULT_RESERVATION_DAYS))
            .ok_or_else(|| AppError::BusinessRule("Fecha de reserva fuera de rango".to_string()))?,
    };

    if expiration_date < reservation_date {
        return Err(AppError::BusinessRule(
            "La fecha de vencimiento no puede ser anterior a la fecha de reserva".to_string(),
        ));
    }

    if payload.reservation_amount > payload.total_price {
        return Err(AppError::BusinessRule(
            "La seña no puede superar el precio total".to_string(),
        ));
    }

    Ok(ReservationInput {
        development_id,
        unit_id: payload.unit_id,
        client_name: payload.client_name,
        client_email: payload.client_email,
        client_phone: payload.client_phone,
        client_document: payload.client_document,
        status: payload.status,
        reservation_amount: payload.reservation_amount,
        total_price: payload.total_price,
        reservation_date,
        expiration_date,
        agent_name: payload.agent_name,
        payment_method: payload.payment_method,
        payment_reference: payload.payment_reference,
        notes: payload.notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    use crate::models::{common::EntityId, operations::ReservationStatus};

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    fn payload() -> CreateReservationPayload {
        CreateReservationPayload {
            development_id: Some(EntityId::Number(3)),
            unit_id: Some(EntityId::Number(31)),
            client_name: " Carlos Benítez ".into(),
            client_email: "Carlos@Correo.com".into(),
            client_phone: None,
            client_document: None,
            status: ReservationStatus::Pending,
            reservation_amount: Decimal::from(1500),
            total_price: Decimal::from(45000),
            reservation_date: None,
            expiration_date: None,
            agent_name: None,
            payment_method: None,
            payment_reference: None,
            notes: None,
        }
    }

    #[test]
    fn expiration_defaults_to_seven_days_after_reservation() {
        let input = prepare_reservation(payload(), date("2024-03-01")).unwrap();
        assert_eq!(input.reservation_date, date("2024-03-01"));
        assert_eq!(input.expiration_date, date("2024-03-08"));
        assert_eq!(input.client_name, "Carlos Benítez");
        assert_eq!(input.client_email, "carlos@correo.com");

        let explicit = CreateReservationPayload { reservation_date: Some(date("2024-12-28")), ..payload() };
        let input = prepare_reservation(explicit, date("2024-03-01")).unwrap();
        assert_eq!(input.expiration_date, date("2025-01-04"));
    }

    #[test]
    fn explicit_expiration_is_kept() {
        let p = CreateReservationPayload { expiration_date: Some(date("2024-04-15")), ..payload() };
        let input = prepare_reservation(p, date("2024-03-01")).unwrap();
        assert_eq!(input.expiration_date, date("2024-04-15"));
    }

    #[test]
    fn expiration_before_reservation_is_rejected() {
        let p = CreateReservationPayload {
            reservation_date: Some(date("2024-03-10")),
            expiration_date: Some(date("2024-03-09")),
            ..payload()
        };
        assert!(matches!(prepare_reservation(p, date("2024-03-01")), Err(AppError::BusinessRule(_))));
    }

    #[test]
    fn missing_development_and_bad_amounts_fail_validation() {
        let p = CreateReservationPayload { development_id: None, ..payload() };
        assert!(matches!(prepare_reservation(p, date("2024-03-01")), Err(AppError::ValidationError(_))));

        let p = CreateReservationPayload { reservation_amount: Decimal::ZERO, ..payload() };
        assert!(matches!(prepare_reservation(p, date("2024-03-01")), Err(AppError::ValidationError(_))));

        let p = CreateReservationPayload { reservation_amount: Decimal::from(50000), ..payload() };
        assert!(matches!(prepare_reservation(p, date("2024-03-01")), Err(AppError::BusinessRule(_))));
    }

    #[test]
    fn whitespace_only_client_name_fails_validation() {
        let p = CreateReservationPayload { client_name: "   ".into(), ..payload() };
        let err = prepare_reservation(p, date("2024-03-01")).unwrap_err();
        assert_eq!(err.user_message(), "El nombre del cliente es obligatorio");
    }

    #[tokio::test]
    async fn blank_client_name_never_reaches_the_backend() {
        use std::time::Duration;
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        use crate::client::BackendClient;

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let client = BackendClient::new(&server.uri(), Duration::from_secs(5), None).unwrap();
        let service = OperationService::new(ReservationRepository::new(client));

        let p = CreateReservationPayload { client_name: " \t ".into(), ..payload() };
        let result = service.create_reservation(p).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }
}
