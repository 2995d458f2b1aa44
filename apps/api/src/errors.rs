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
///
/// Only endpoints without a local fallback (article, chat) surface provider
/// failures; the generation pipeline recovers from them itself.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{context}: {source}")]
    Llm {
        context: &'static str,
        #[source]
        source: LlmError,
    },
}

impl AppError {
    pub fn llm(context: &'static str) -> impl FnOnce(LlmError) -> AppError {
        move |source| AppError::Llm { context, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Llm {
                source: LlmError::NotConfigured,
                ..
            } => {
                tracing::error!("LLM error: {self}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "NOT_CONFIGURED",
                    "OpenAI API key is not configured properly".to_string(),
                )
            }
            AppError::Llm { context, .. } => {
                tracing::error!("LLM error: {self}");
                (StatusCode::BAD_GATEWAY, "LLM_ERROR", context.to_string())
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code
        }));

        (status, body).into_response()
    }
}
