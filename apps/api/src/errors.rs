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
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Llm(err) => llm_parts(err),
        }
    }
}

fn llm_parts(err: &LlmError) -> (StatusCode, &'static str, String) {
    match err {
        LlmError::RetriesExhausted { .. } | LlmError::RateLimited { .. } => {
            tracing::warn!("Analysis gave up on rate limiting: {err}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "MAX_RETRIES_EXCEEDED",
                "The analysis service is busy. Please try again later.".to_string(),
            )
        }
        LlmError::EmptyContent => (
            StatusCode::BAD_GATEWAY,
            "ANALYSIS_NOT_RECEIVED",
            "No analysis was received.".to_string(),
        ),
        LlmError::Parse(_) | LlmError::InvalidResponse(_) => {
            tracing::error!("Malformed analysis from model: {err}");
            (
                StatusCode::BAD_GATEWAY,
                "INVALID_ANALYSIS",
                "The analysis could not be read.".to_string(),
            )
        }
        LlmError::MissingApiKey => {
            tracing::error!("{err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIGURATION_ERROR",
                "The analysis service is not configured.".to_string(),
            )
        }
        LlmError::Http(_) | LlmError::Api { .. } => {
            tracing::error!("LLM error: {err}");
            (
                StatusCode::BAD_GATEWAY,
                "LLM_ERROR",
                "An AI processing error occurred".to_string(),
            )
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
