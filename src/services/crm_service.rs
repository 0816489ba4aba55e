// src/services/crm_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::{
    client::ContactGateway,
    common::error::AppError,
    models::{
        common::{BatchItemResult, ImportSummary},
        crm::{Budget, Contact, ContactInput},
    },
};

const REQUIRED_COLUMNS: [&str; 3] = ["firstName", "lastName", "email"];

#[derive(Clone)]
pub struct CrmService {
    contacts: Arc<dyn ContactGateway>,
}

impl CrmService {
    pub fn new(contacts: Arc<dyn ContactGateway>) -> Self {
        Self { contacts }
    }

    pub async fn create_contact(&self, input: ContactInput) -> Result<Contact, AppError> {
        let input = input.trimmed();
        input.validate()?;
        self.contacts.create_contact(&input).await
    }

    // =========================================================================
    //  IMPORTAÇÃO CSV
    // =========================================================================

    /// Cada linha válida vira uma criação independente. Falhas são contadas e o lote segue.
    pub async fn import_csv(&self, csv_text: &str) -> Result<ImportSummary, AppError> {
        let rows = parse_contacts_csv(csv_text)?;
        let batch_id = Uuid::new_v4();

        tracing::info!("📥 Importação {}: {} linhas lidas", batch_id, rows.len());

        let mut results = Vec::with_capacity(rows.len());
        for (position, row) in rows.into_iter().enumerate() {
            let index = position + 1;
            let outcome = match row {
                Ok(input) => self.contacts.create_contact(&input).await.map_err(|e| e.user_message()),
                Err(reason) => Err(reason),
            };

            match outcome {
                Ok(_) => results.push(BatchItemResult::ok(index)),
                Err(reason) => {
                    tracing::warn!("⚠️ Importação {}: linha {} ignorada: {}", batch_id, index, reason);
                    results.push(BatchItemResult::failed(index, reason));
                }
            }
        }

        let imported = results.iter().filter(|r| r.success).count();
        let errors = results.len() - imported;

        tracing::info!("✅ Importação {}: {} ok, {} com erro", batch_id, imported, errors);

        Ok(ImportSummary {
            batch_id,
            imported,
            errors,
            message: format!("{} contactos importados, {} errores", imported, errors),
            results,
        })
    }
}

/// Lê o CSV e devolve uma entrada por linha de dados: o contato pronto ou o motivo da rejeição.
///
/// Um cabeçalho sem alguma das colunas obrigatórias invalida o arquivo inteiro.
pub fn parse_contacts_csv(csv_text: &str) -> Result<Vec<Result<ContactInput, String>>, AppError> {
    let text = csv_text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| !headers.iter().any(|h| h.eq_ignore_ascii_case(name)))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::BusinessRule(format!(
            "El archivo CSV no tiene las columnas obligatorias: {}",
            missing.join(", ")
        )));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                rows.push(Err(format!("Fila mal formada: {}", e)));
                continue;
            }
        };

        // Campo pelo nome do cabeçalho (sem diferenciar maiúsculas); vazio vira None
        let field = |name: &str| -> Option<String> {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .and_then(|i| record.get(i))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        rows.push(contact_from_fields(&field));
    }

    Ok(rows)
}

fn contact_from_fields(field: &dyn Fn(&str) -> Option<String>) -> Result<ContactInput, String> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| field(*name).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(format!("Faltan campos obligatorios: {}", missing.join(", ")));
    }

    let mut input = ContactInput {
        first_name: field("firstName").unwrap_or_default(),
        last_name: field("lastName").unwrap_or_default(),
        email: field("email").unwrap_or_default().to_lowercase(),
        phone: field("phone").unwrap_or_default(),
        company: field("company"),
        position: field("position"),
        address: field("address"),
        city: field("city"),
        state: field("state"),
        zip_code: field("zipCode"),
        country: field("country"),
        notes: field("notes"),
        source: field("source").or_else(|| Some("csv".to_string())),
        ..Default::default()
    };

    if let Some(raw) = field("type") {
        input.contact_type = raw.parse()?;
    }
    if let Some(raw) = field("status") {
        input.status = raw.parse()?;
    }

    input.tags = field("tags")
        .map(|raw| {
            raw.split(';')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let min = parse_amount(field("budgetMin"), "budgetMin")?;
    let max = parse_amount(field("budgetMax"), "budgetMax")?;
    let currency = field("budgetCurrency");
    if min.is_some() || max.is_some() || currency.is_some() {
        input.budget = Some(Budget { min, max, currency });
    }

    input.validate().map_err(|e| AppError::from(e).user_message())?;
    Ok(input)
}

fn parse_amount(raw: Option<String>, column: &str) -> Result<Option<Decimal>, String> {
    raw.map(|v| {
        v.parse::<Decimal>()
            .map_err(|_| format!("Valor inválido en {}: {}", column, v))
    })
    .transpose()
}
