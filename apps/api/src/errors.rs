use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Retry semantics are part of the contract:
/// - `Validation` / `UnsupportedFormat` / `Extraction`: terminal, the caller
///   must fix the input (re-upload for extraction failures).
/// - `BackendUnavailable` / `Timeout`: retriable, but only on user action —
///   the server never loops on them.
/// - `Analysis`: raised after the single corrective re-prompt has been spent.
/// - `Document`: deterministic; one automatic retry happens before this
///   surfaces.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("AI backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("AI backend timed out: {0}")]
    Timeout(String),

    #[error("Analysis failed: {0}")]
    Analysis(String),

    #[error("Enhancement failed: {0}")]
    Enhancement(String),

    #[error("Document generation failed: {0}")]
    Document(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedFormat(msg) => {
                (StatusCode::BAD_REQUEST, "UNSUPPORTED_FORMAT", msg.clone())
            }
            AppError::Extraction(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_FAILED",
                msg.clone(),
            ),
            AppError::BackendUnavailable(msg) => {
                tracing::error!("AI backend unavailable: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "BACKEND_UNAVAILABLE",
                    "The AI backend is currently unavailable. Please retry.".to_string(),
                )
            }
            AppError::Timeout(msg) => {
                tracing::error!("AI backend timeout: {msg}");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "BACKEND_TIMEOUT",
                    "The AI backend took too long to respond. Please retry.".to_string(),
                )
            }
            AppError::Analysis(msg) => {
                tracing::error!("Analysis failed: {msg}");
                (StatusCode::BAD_GATEWAY, "ANALYSIS_FAILED", msg.clone())
            }
            AppError::Enhancement(msg) => {
                tracing::error!("Enhancement failed: {msg}");
                (StatusCode::BAD_GATEWAY, "ENHANCEMENT_FAILED", msg.clone())
            }
            AppError::Document(msg) => {
                tracing::error!("Document generation failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DOCUMENT_GENERATION_FAILED",
                    "Document generation failed.".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
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
