use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad input caught before any network call. Recoverable in place.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network, status or credential failure talking to the model provider.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Model output could not be trusted as the declared shape.
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::EmptyContent => AppError::EmptyResponse,
            LlmError::Parse(e) => AppError::SchemaViolation(e.to_string()),
            transport @ (LlmError::Http(_) | LlmError::Api { .. } | LlmError::MissingApiKey) => {
                AppError::Transport(transport.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Transport(msg) => {
                tracing::error!("Transport error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "TRANSPORT_ERROR",
                    "Could not reach the AI provider".to_string(),
                )
            }
            AppError::SchemaViolation(msg) => {
                tracing::error!("Schema violation: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SCHEMA_VIOLATION",
                    "The AI provider returned a malformed result".to_string(),
                )
            }
            AppError::EmptyResponse => (
                StatusCode::BAD_GATEWAY,
                "EMPTY_RESPONSE",
                "The AI provider returned no content".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
