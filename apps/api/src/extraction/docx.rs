//! DOCX text extraction.
//!
//! A .docx file is a zip container; the document body lives in
//! `word/document.xml`. Text is pulled from `<w:t>` runs, with paragraph
//! ends (`</w:p>`) mapped to newlines so the extracted text keeps the
//! document's paragraph structure.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::errors::AppError;

const DOCUMENT_ENTRY: &str = "word/document.xml";

/// Extracts plain text from DOCX bytes.
pub fn extract(bytes: &[u8]) -> Result<String, AppError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AppError::Extraction(format!("Could not open document container: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_ENTRY)
        .map_err(|e| AppError::Extraction(format!("Document body missing: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| AppError::Extraction(format!("Could not read document body: {e}")))?;

    document_xml_to_text(&xml)
}

/// Walks the WordprocessingML body and flattens it to plain text.
fn document_xml_to_text(xml: &str) -> Result<String, AppError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = true,
                b"br" => out.push('\n'),
                b"tab" => out.push('\t'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"br" => out.push('\n'),
                b"tab" => out.push('\t'),
                // Self-closing empty paragraph — still a paragraph boundary.
                b"p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let text = t
                    .unescape()
                    .map_err(|e| AppError::Extraction(format!("Malformed document text: {e}")))?;
                out.push_str(&text);
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(AppError::Extraction(format!(
                    "Malformed document XML: {e}"
                )))
            }
        }
    }

    Ok(out)
}
