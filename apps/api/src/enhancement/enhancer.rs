//! Resume Enhancer — one constrained rewrite call.
//!
//! No automatic retry here: a rewrite is expensive and slow, so retrying is
//! a caller-initiated action.

use crate::analysis::models::Suggestion;
use crate::enhancement::prompts::{enhancement_user_prompt, ENHANCEMENT_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::{ChatBackend, ChatRequest, LlmError};

const ENHANCEMENT_TEMPERATURE: f32 = 0.4;

/// Rewrites the resume applying the selected suggestions.
/// Returns the enhanced plain text.
pub async fn enhance(
    llm: &dyn ChatBackend,
    resume_text: &str,
    job_description: &str,
    suggestions: &[Suggestion],
) -> Result<String, AppError> {
    let request = ChatRequest {
        system: ENHANCEMENT_SYSTEM.to_string(),
        user: enhancement_user_prompt(resume_text, job_description, suggestions),
        temperature: ENHANCEMENT_TEMPERATURE,
        json_mode: false,
    };

    let enhanced = match llm.complete(&request).await {
        Ok(text) => text,
        Err(LlmError::EmptyContent) => {
            return Err(AppError::Enhancement(
                "The AI backend returned an empty rewrite.".to_string(),
            ))
        }
        Err(e) => return Err(e.into()),
    };

    let enhanced = enhanced.trim().to_string();
    if enhanced.is_empty() {
        return Err(AppError::Enhancement(
            "The AI backend returned an empty rewrite.".to_string(),
        ));
    }

    Ok(enhanced)
}
