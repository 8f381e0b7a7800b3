//! Axum route handlers for enhancement and document download.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::models::Suggestion;
use crate::analysis::store::analysis_exists;
use crate::enhancement::enhancer::enhance;
use crate::errors::AppError;
use crate::render;
use crate::state::AppState;

/// Shared request body for enhancement and document generation.
/// For the document endpoints the text is already final and `suggestions`
/// is ignored.
#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    pub analysis_id: Uuid,
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Serialize)]
pub struct EnhanceResponse {
    pub success: bool,
    pub analysis_id: Uuid,
    pub enhanced_text: String,
    /// The untouched input, returned so a reviewing layer can diff the
    /// rewrite — the "only selected suggestions" contract is probabilistic,
    /// not system-guaranteed.
    pub original_text: String,
    /// Echo of the selected suggestions, by value. Always the same count as
    /// the request — the data layer drops nothing.
    pub applied_suggestions: Vec<Suggestion>,
}

/// POST /api/enhance-resume
///
/// Rewrites the resume applying the user-selected suggestions. Validation
/// runs before any backend contact; the analysis id must reference a stored
/// record (the session never enhances before analysis completes).
pub async fn handle_enhance(
    State(state): State<AppState>,
    Json(request): Json<EnhanceRequest>,
) -> Result<Json<EnhanceResponse>, AppError> {
    if request.suggestions.is_empty() {
        return Err(AppError::Validation(
            "No suggestions selected. Pick at least one improvement to apply.".to_string(),
        ));
    }
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }
    if !analysis_exists(&state.db, request.analysis_id).await? {
        return Err(AppError::NotFound(format!(
            "Analysis {} not found",
            request.analysis_id
        )));
    }

    info!(
        "Enhancing resume for analysis {} ({} suggestions selected)",
        request.analysis_id,
        request.suggestions.len()
    );

    let enhanced_text = enhance(
        state.llm.as_ref(),
        &request.resume_text,
        &request.job_description,
        &request.suggestions,
    )
    .await?;

    Ok(Json(EnhanceResponse {
        success: true,
        analysis_id: request.analysis_id,
        enhanced_text,
        original_text: request.resume_text,
        applied_suggestions: request.suggestions,
    }))
}

/// POST /api/generate-docx
///
/// Streams back a DOCX of the final resume text. The client sends the
/// enhanced text in `resume_text`; one automatic retry on generation
/// failure (the emitter is deterministic and side-effect free).
pub async fn handle_generate_docx(
    State(_state): State<AppState>,
    Json(request): Json<EnhanceRequest>,
) -> Result<impl IntoResponse, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let bytes = render::build_docx_with_retry(&request.resume_text)?;
    let filename = render::download_filename(request.analysis_id, "docx");

    Ok((
        [
            (header::CONTENT_TYPE, render::DOCX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}

/// POST /api/generate-txt
///
/// Streams back the byte-identical plain-text artifact of the final text.
pub async fn handle_generate_txt(
    State(_state): State<AppState>,
    Json(request): Json<EnhanceRequest>,
) -> Result<impl IntoResponse, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let bytes = render::plain_text_artifact(&request.resume_text);
    let filename = render::download_filename(request.analysis_id, "txt");

    Ok((
        [
            (header::CONTENT_TYPE, render::TXT_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}
