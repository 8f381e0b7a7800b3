//! Text Extraction — converts an uploaded resume file into plain text.
//!
//! Pure transform: bytes in, trimmed UTF-8 out. The extension gate and the
//! size gate both run before any decode attempt. Parsing is deterministic,
//! so extraction failures are never auto-retried — the user re-uploads.

pub mod docx;
pub mod pdf;

use crate::errors::AppError;

/// Resume file formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Pdf,
    Docx,
    Doc,
    Txt,
}

impl FileFormat {
    /// Detects the format from the uploaded filename's extension.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = filename.rsplit_once('.').map(|(_, e)| e.to_lowercase())?;
        match ext.as_str() {
            "pdf" => Some(FileFormat::Pdf),
            "docx" => Some(FileFormat::Docx),
            "doc" => Some(FileFormat::Doc),
            "txt" => Some(FileFormat::Txt),
            _ => None,
        }
    }
}

/// Extracts plain text from uploaded file bytes.
///
/// Fails with `UnsupportedFormat` for unrecognized extensions, `Validation`
/// for oversized input, and `Extraction` for content that cannot be decoded.
pub fn extract_text(bytes: &[u8], filename: &str, max_bytes: usize) -> Result<String, AppError> {
    let format = FileFormat::from_filename(filename).ok_or_else(|| {
        AppError::UnsupportedFormat(format!(
            "Unsupported file type '{filename}'. Please upload a PDF, DOCX, DOC, or TXT file."
        ))
    })?;

    if bytes.len() > max_bytes {
        return Err(AppError::Validation(format!(
            "File is too large ({} bytes, limit {} bytes).",
            bytes.len(),
            max_bytes
        )));
    }

    let text = match format {
        FileFormat::Pdf => pdf::extract(bytes)?,
        // Legacy .doc uploads are attempted with the same OOXML reader;
        // true binary .doc files fail the zip gate and surface as Extraction.
        FileFormat::Docx | FileFormat::Doc => docx::extract(bytes)?,
        FileFormat::Txt => extract_txt(bytes),
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::Extraction(
            "No text could be extracted. Try a different file format.".to_string(),
        ));
    }

    Ok(text)
}

/// Decodes TXT uploads as UTF-8, falling back to Latin-1.
fn extract_txt(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
