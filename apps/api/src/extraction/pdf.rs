//! PDF text extraction, entirely in-memory.

use crate::errors::AppError;

/// Extracts plain text from PDF bytes.
/// Encrypted or corrupt PDFs surface as `Extraction` errors.
pub fn extract(bytes: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Extraction(format!("Could not parse PDF: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_fail_extraction() {
        let result = extract(b"not a pdf at all");
        assert!(matches!(result, Err(AppError::Extraction(_))));
    }

    #[test]
    fn test_truncated_header_fails_extraction() {
        let result = extract(b"%PDF-1.7\n");
        assert!(matches!(result, Err(AppError::Extraction(_))));
    }
}
