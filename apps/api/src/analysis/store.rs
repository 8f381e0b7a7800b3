//! Append-only audit store for analyses.
//!
//! Records are written exactly once, in a single INSERT — the full validated
//! record lands atomically or not at all. Nothing here issues UPDATE or
//! DELETE; later stages only check existence by id.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::analysis::models::AnalysisRecord;
use crate::errors::AppError;

/// Persists a new `AnalysisRecord`. The flattened analysis payload is stored
/// as JSONB alongside the indexed columns.
pub async fn insert_analysis(pool: &PgPool, record: &AnalysisRecord) -> Result<(), AppError> {
    let payload = serde_json::to_value(&record.analysis)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize analysis: {e}")))?;

    sqlx::query(
        r#"
        INSERT INTO analyses
            (analysis_id, filename, has_jd, resume_text, job_description, payload, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(record.analysis_id)
    .bind(&record.filename)
    .bind(record.has_jd)
    .bind(&record.resume_text)
    .bind(&record.job_description)
    .bind(&payload)
    .bind(record.created_at)
    .execute(pool)
    .await?;

    info!("Stored analysis {}", record.analysis_id);
    Ok(())
}

/// Checks that an analysis id refers to a stored record. Used by the
/// enhancement stage to enforce the session ordering — enhance never runs
/// against an id the analyzer has not completed.
pub async fn analysis_exists(pool: &PgPool, analysis_id: Uuid) -> Result<bool, AppError> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM analyses WHERE analysis_id = $1)")
            .bind(analysis_id)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}
