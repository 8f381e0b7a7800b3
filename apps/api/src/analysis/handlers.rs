//! Axum route handler for the analysis endpoint.

use axum::extract::{Multipart, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::analysis::analyzer::run_analysis;
use crate::analysis::models::{Analysis, AnalysisRecord};
use crate::analysis::store::insert_analysis;
use crate::errors::AppError;
use crate::extraction::extract_text;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(flatten)]
    pub record: AnalysisRecord,
}

/// POST /api/analyze-resume
///
/// Multipart upload: `resume_file` (PDF/DOCX/DOC/TXT) plus an optional
/// `job_description` text field. Empty or missing job description means
/// general mode. Persists one new `AnalysisRecord` and returns it; calling
/// twice with identical input produces two distinct records.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut job_description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart upload: {e}")))?
    {
        match field.name() {
            Some("resume_file") => {
                let filename = field
                    .file_name()
                    .unwrap_or("resume")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
                file = Some((filename, bytes.to_vec()));
            }
            Some("job_description") => {
                job_description = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read field: {e}")))?;
            }
            _ => {}
        }
    }

    let (filename, bytes) = file.ok_or_else(|| {
        AppError::Validation("Missing required multipart field 'resume_file'".to_string())
    })?;

    // Extraction is CPU-bound decode work — keep it off the async runtime.
    let max_bytes = state.config.max_upload_bytes;
    let extract_filename = filename.clone();
    let resume_text =
        tokio::task::spawn_blocking(move || extract_text(&bytes, &extract_filename, max_bytes))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Extraction task failed: {e}")))??;

    let job_description = job_description.trim().to_string();
    let has_jd = !job_description.is_empty();

    info!(
        "Analyzing '{}' ({} chars extracted, targeted={})",
        filename,
        resume_text.len(),
        has_jd
    );

    let analysis = run_analysis(state.llm.as_ref(), &resume_text, &job_description).await?;

    let record = build_record(filename, resume_text, job_description, analysis);

    // Atomic: the full validated record is stored or the call fails.
    insert_analysis(&state.db, &record).await?;

    Ok(Json(AnalyzeResponse {
        success: true,
        record,
    }))
}

/// Assembles the immutable record for one analysis call. Every call mints a
/// fresh v4 id — identical inputs never overwrite an earlier record.
fn build_record(
    filename: String,
    resume_text: String,
    job_description: String,
    analysis: Analysis,
) -> AnalysisRecord {
    let job_description = job_description.trim().to_string();
    let has_jd = !job_description.is_empty();

    AnalysisRecord {
        analysis_id: Uuid::new_v4(),
        filename,
        has_jd,
        resume_text,
        job_description: has_jd.then_some(job_description),
        created_at: Utc::now(),
        analysis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::{BreakdownEntry, KeywordAnalysis};
    use crate::analysis::prompts::BREAKDOWN_CATEGORIES;

    fn analysis_fixture() -> Analysis {
        Analysis {
            ats_score: 55,
            summary: "Readable but generic.".to_string(),
            score_breakdown: BREAKDOWN_CATEGORIES
                .iter()
                .map(|c| BreakdownEntry {
                    category: c.to_string(),
                    score: 50,
                    comment: "Observation.".to_string(),
                })
                .collect(),
            strengths: vec!["Concise".to_string()],
            weaknesses: vec!["No metrics".to_string()],
            keyword_analysis: KeywordAnalysis {
                matched: vec!["Python".to_string()],
                missing: vec!["SQL".to_string()],
                density_pct: 35,
                notes: "Thin coverage.".to_string(),
            },
            suggestions: vec![],
        }
    }

    #[test]
    fn test_identical_inputs_produce_distinct_record_ids() {
        let first = build_record(
            "resume.pdf".to_string(),
            "John Doe".to_string(),
            String::new(),
            analysis_fixture(),
        );
        let second = build_record(
            "resume.pdf".to_string(),
            "John Doe".to_string(),
            String::new(),
            analysis_fixture(),
        );
        assert_ne!(first.analysis_id, second.analysis_id);
    }

    #[test]
    fn test_general_mode_record_has_no_jd() {
        let record = build_record(
            "resume.txt".to_string(),
            "John Doe\nSoftware Engineer\n5 years Python".to_string(),
            String::new(),
            analysis_fixture(),
        );
        assert!(!record.has_jd);
        assert!(record.job_description.is_none());
        assert_eq!(record.analysis.score_breakdown.len(), 6);
    }

    #[test]
    fn test_whitespace_jd_counts_as_general_mode() {
        let record = build_record(
            "resume.txt".to_string(),
            "John Doe".to_string(),
            "   \n  ".to_string(),
            analysis_fixture(),
        );
        assert!(!record.has_jd);
        assert!(record.job_description.is_none());
    }

    #[test]
    fn test_targeted_mode_record_keeps_trimmed_jd() {
        let record = build_record(
            "resume.txt".to_string(),
            "John Doe".to_string(),
            "  Senior Rust Engineer  ".to_string(),
            analysis_fixture(),
        );
        assert!(record.has_jd);
        assert_eq!(
            record.job_description.as_deref(),
            Some("Senior Rust Engineer")
        );
    }
}
