// src/models/common.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::common::error::AppError;

// O backend às vezes usa IDs numéricos, às vezes strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl EntityId {
    /// Interpreta um segmento de URL / query: número se possível, texto caso contrário.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        raw.parse::<i64>()
            .map(EntityId::Number)
            .unwrap_or_else(|_| EntityId::Text(raw.to_string()))
    }

    /// Forma segura para compor a URL do backend. Só aceita `[A-Za-z0-9_-]`;
    /// `/`, `.`, `?`, `#` e `%` mudariam o recurso alvo.
    pub fn segment(&self) -> Result<String, AppError> {
        match self {
            EntityId::Number(n) => Ok(n.to_string()),
            EntityId::Text(s) => {
                let valid = !s.is_empty()
                    && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
                if valid {
                    Ok(s.clone())
                } else {
                    tracing::warn!("⚠️ Identificador recusado: {:?}", s);
                    Err(AppError::BusinessRule("Identificador inválido".to_string()))
                }
            }
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{}", n),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        EntityId::Number(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        EntityId::Text(value.to_string())
    }
}

// --- PAGINAÇÃO ---

/// Formato canônico de listas, seja qual for o envelope devolvido pelo backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self { items: Vec::new(), total: 0, page: 0, page_size: 0 }
    }

    pub fn from_items(items: Vec<T>) -> Self {
        let len = items.len();
        Self { items, total: len as u64, page: 0, page_size: len as u32 }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageRequest {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl PageRequest {
    pub fn to_query(&self) -> String {
        match (self.page, self.size) {
            (None, None) => String::new(),
            (page, size) => format!(
                "?page={}&size={}",
                page.unwrap_or(0),
                size.unwrap_or(50)
            ),
        }
    }
}

// --- LOTES (plano de cuotas / importação CSV) ---

/// Resultado de um item dentro de uma operação em lote. `index` começa em 1.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemResult {
    pub index: usize,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchItemResult {
    pub fn ok(index: usize) -> Self {
        Self { index, success: true, error: None }
    }

    pub fn failed(index: usize, error: impl Into<String>) -> Self {
        Self { index, success: false, error: Some(error.into()) }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub batch_id: Uuid,
    pub imported: usize,
    pub errors: usize,
    #[schema(example = "2 contactos importados, 1 errores")]
    pub message: String,
    pub results: Vec<BatchItemResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_accepts_numbers_and_plain_codes() {
        assert_eq!(EntityId::parse(" 42 ").segment().unwrap(), "42");
        assert_eq!(EntityId::parse("UNIT_A-1").segment().unwrap(), "UNIT_A-1");
        assert_eq!(
            EntityId::parse("5f0c2b1e-9d3a-4c11-8e2f-0a1b2c3d4e5f").segment().unwrap(),
            "5f0c2b1e-9d3a-4c11-8e2f-0a1b2c3d4e5f"
        );
    }

    #[test]
    fn segment_rejects_ids_that_change_the_target() {
        for raw in ["../developments/5", "..", "1?force=true", "1#x", "a/b", "%2e%2e", "a b", ""] {
            let result = EntityId::parse(raw).segment();
            assert!(matches!(result, Err(AppError::BusinessRule(_))), "aceitou {:?}", raw);
        }
    }
}
