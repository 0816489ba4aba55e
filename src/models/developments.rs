// src/models/developments.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::serde_utils::{lenient, null_as_default};
use crate::models::common::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DevelopmentType {
    Loteamiento,
    Edificio,
    Condominio,
    BarrioCerrado,
}

impl DevelopmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DevelopmentType::Loteamiento => "loteamiento",
            DevelopmentType::Edificio => "edificio",
            DevelopmentType::Condominio => "condominio",
            DevelopmentType::BarrioCerrado => "barrio_cerrado",
        }
    }
}

// O backend manda o status com capitalização variada ("Available", "SOLD"...).
// Só aqui a comparação é case-insensitive; unidades, reservas e cuotas são exatas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DevelopmentStatus {
    Available,
    Sold,
    Reserved,
}

impl DevelopmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DevelopmentStatus::Available => "available",
            DevelopmentStatus::Sold => "sold",
            DevelopmentStatus::Reserved => "reserved",
        }
    }
}

impl TryFrom<String> for DevelopmentStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "available" => Ok(DevelopmentStatus::Available),
            "sold" => Ok(DevelopmentStatus::Sold),
            "reserved" => Ok(DevelopmentStatus::Reserved),
            other => Err(format!("estado de desarrollo desconocido: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Development {
    pub id: EntityId,
    #[schema(example = "Residencial Los Lapachos")]
    pub title: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    // Tipo ou status fora do catálogo chegam como None: o registro continua na lista
    #[serde(rename = "type", default, deserialize_with = "lenient::deserialize")]
    pub development_type: Option<DevelopmentType>,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub status: Option<DevelopmentStatus>,
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub images: Vec<String>,
    pub views: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentInput {
    #[validate(length(min = 1, message = "El título es obligatorio"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, message = "La dirección es obligatoria"))]
    pub address: String,
    #[validate(length(min = 1, message = "La ciudad es obligatoria"))]
    pub city: String,
    #[serde(rename = "type")]
    pub development_type: DevelopmentType,
    #[serde(default = "default_status")]
    pub status: DevelopmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl DevelopmentInput {
    pub fn trimmed(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.address = self.address.trim().to_string();
        self.city = self.city.trim().to_string();
        self
    }
}

fn default_status() -> DevelopmentStatus {
    DevelopmentStatus::Available
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::backend_client::normalize_list;
    use crate::models::common::Page;

    #[test]
    fn status_is_parsed_ignoring_case() {
        for raw in [r#""Available""#, r#""AVAILABLE""#, r#""available""#] {
            let status: DevelopmentStatus = serde_json::from_str(raw).unwrap();
            assert_eq!(status, DevelopmentStatus::Available);
        }
        assert_eq!(serde_json::to_string(&DevelopmentStatus::Sold).unwrap(), r#""sold""#);
        // o enum em si continua estrito (entradas de escrita)
        assert!(serde_json::from_str::<DevelopmentStatus>(r#""demolished""#).is_err());
    }

    #[test]
    fn odd_records_do_not_break_the_list() {
        let body = r#"{"content":[
            {"id":1,"title":"Los Lapachos","status":"AVAILABLE","type":"edificio","images":["a.jpg"]},
            {"id":2,"title":"Torre Sur","status":"en_obra","type":"torre","images":null},
            {"id":3,"title":"Villa Morra"}
        ],"totalElements":3}"#;

        let page: Page<Development> = normalize_list(body).unwrap();

        assert_eq!(page.items.len(), 3);
        assert_eq!(page.items[0].status, Some(DevelopmentStatus::Available));
        assert_eq!(page.items[0].development_type, Some(DevelopmentType::Edificio));
        assert_eq!(page.items[1].status, None);
        assert_eq!(page.items[1].development_type, None);
        assert!(page.items[1].images.is_empty());
        assert_eq!(page.items[2].status, None);
        assert!(page.items[2].images.is_empty());
    }

    #[test]
    fn development_type_uses_snake_case() {
        let t: DevelopmentType = serde_json::from_str(r#""barrio_cerrado""#).unwrap();
        assert_eq!(t, DevelopmentType::BarrioCerrado);
    }
}
