// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// Mensagem genérica quando o backend não devolve nada aproveitável.
pub const GENERIC_BACKEND_MESSAGE: &str = "Error al comunicarse con el servidor. Intente nuevamente.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de validación")]
    ValidationError(#[from] validator::ValidationErrors),

    // Regra de negócio violada antes de qualquer chamada ao backend
    #[error("{0}")]
    BusinessRule(String),

    // 404 do backend sem mensagem própria
    #[error("Recurso no encontrado")]
    NotFound,

    // Resposta não-2xx do backend REST
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("No se pudo conectar con el servidor")]
    Http(#[from] reqwest::Error),

    #[error("Respuesta inválida del servidor")]
    Decode(#[from] serde_json::Error),

    #[error("Archivo CSV inválido: {0}")]
    Csv(#[from] csv::Error),

    #[error("Error de base de datos")]
    DatabaseError(#[from] sqlx::Error),
}

impl AppError {
    /// Texto que pode ser mostrado ao usuário final (toast / alerta).
    pub fn user_message(&self) -> String {
        match self {
            AppError::ValidationError(errors) => first_validation_message(errors)
                .unwrap_or_else(|| "Uno o más campos son inválidos.".to_string()),
            other => other.to_string(),
        }
    }

    pub fn to_api_error(&self) -> ApiError {
        match self {
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<Value> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .map(Value::String)
                        .collect();
                    details.insert(field.to_string(), Value::Array(messages));
                }
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    message: "Uno o más campos son inválidos.".to_string(),
                    details: Some(Value::Object(details)),
                }
            }
            AppError::BusinessRule(message) => ApiError::new(StatusCode::BAD_REQUEST, message),
            AppError::NotFound => ApiError::new(StatusCode::NOT_FOUND, "Recurso no encontrado."),
            AppError::Backend { status, message } => {
                // 4xx do backend são problemas do pedido; o resto vira 502
                let status = match *status {
                    400 | 409 | 422 => StatusCode::BAD_REQUEST,
                    404 => StatusCode::NOT_FOUND,
                    _ => StatusCode::BAD_GATEWAY,
                };
                ApiError::new(status, message)
            }
            AppError::Http(_) | AppError::Decode(_) => {
                tracing::error!("Falha na comunicação com o backend: {:?}", self);
                ApiError::new(StatusCode::BAD_GATEWAY, self.to_string())
            }
            AppError::Csv(_) => ApiError::new(StatusCode::BAD_REQUEST, self.to_string()),
            ref e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Ocurrió un error inesperado.")
            }
        }
    }
}

fn first_validation_message(errors: &validator::ValidationErrors) -> Option<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
}

// O erro que sai pela API HTTP
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), details: None }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        err.to_api_error()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    #[test]
    fn backend_errors_keep_the_upstream_message() {
        let err = AppError::Backend { status: 422, message: "Cuota duplicada".into() };
        assert_eq!(err.user_message(), "Cuota duplicada");

        let api = err.to_api_error();
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.message, "Cuota duplicada");
    }

    #[test]
    fn upstream_server_errors_become_bad_gateway() {
        let api = AppError::Backend { status: 503, message: GENERIC_BACKEND_MESSAGE.into() }.to_api_error();
        assert_eq!(api.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn validation_errors_list_details_per_field() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("required");
        err.message = Some("Seleccione una unidad".into());
        errors.add("unitId", err);

        let app_err = AppError::ValidationError(errors);
        assert_eq!(app_err.user_message(), "Seleccione una unidad");

        let api = app_err.to_api_error();
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.expect("details");
        assert_eq!(details["unitId"][0], "Seleccione una unidad");
    }
}
