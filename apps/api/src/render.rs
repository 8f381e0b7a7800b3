//! Document Emitter — turns final resume text into downloadable artifacts.
//!
//! Two outputs: a byte-identical plain-text artifact, and a DOCX where every
//! line of the text maps 1:1 to one document paragraph. No styling is
//! invented — the text is the document. Generation is deterministic and
//! side-effect free, so a single automatic retry is safe.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TXT_MIME: &str = "text/plain; charset=utf-8";

/// The plain-text artifact: byte-identical to the input text.
pub fn plain_text_artifact(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// Builds the DOCX artifact. Each paragraph break in the text maps to
/// exactly one document paragraph.
pub fn build_docx(text: &str) -> Result<Vec<u8>, AppError> {
    let mut docx = Docx::new();
    for line in text.split('\n') {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line)));
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| AppError::Document(format!("Could not pack document: {e}")))?;

    Ok(cursor.into_inner())
}

/// Builds the DOCX artifact with one automatic retry on failure.
pub fn build_docx_with_retry(text: &str) -> Result<Vec<u8>, AppError> {
    match build_docx(text) {
        Ok(bytes) => Ok(bytes),
        Err(first) => {
            warn!("Document generation failed, retrying once: {first}");
            build_docx(text)
        }
    }
}

/// Download filename correlated to the analysis id.
pub fn download_filename(analysis_id: Uuid, extension: &str) -> String {
    let id = analysis_id.simple().to_string();
    format!("enhanced_resume_{}.{extension}", &id[..8])
}
