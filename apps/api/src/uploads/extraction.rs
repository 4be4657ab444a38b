//! Text extraction for uploaded résumés.
//!
//! PDFs go through `pdf-extract`; `text/*` uploads are decoded as UTF-8.
//! Extraction never blocks the pipeline: any failure is turned into a
//! placeholder string that still goes to the analyzer.

use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("PDF extraction aborted: {0}")]
    Aborted(String),

    #[error("document contains no extractable text")]
    NoText,
}

/// Extracts plain text from an uploaded file.
/// Blocking and CPU-bound; run it off the async executor.
pub fn extract_text(bytes: &[u8], mime_type: &str) -> Result<String, ExtractionError> {
    let text = if mime_type.starts_with("text/") {
        String::from_utf8_lossy(bytes).into_owned()
    } else {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractionError::Pdf(e.to_string()))?
    };

    if text.trim().is_empty() {
        return Err(ExtractionError::NoText);
    }
    Ok(text)
}

/// Text handed to the analyzer for an upload: the extracted text, or a
/// placeholder naming the file when extraction fails.
pub async fn resume_text_or_placeholder(bytes: Bytes, mime_type: &str, original_name: &str) -> String {
    if bytes.is_empty() {
        warn!("Upload '{original_name}' is empty, skipping extraction");
        return "No resume file uploaded.".to_string();
    }

    let mime = mime_type.to_string();
    // pdf-extract can panic on malformed input; the join error contains it.
    let extracted = tokio::task::spawn_blocking(move || extract_text(&bytes, &mime))
        .await
        .unwrap_or_else(|e| Err(ExtractionError::Aborted(e.to_string())));

    match extracted {
        Ok(text) => {
            info!(
                "Extracted {} chars from '{original_name}'",
                text.chars().count()
            );
            text
        }
        Err(e) => {
            warn!("Text extraction failed for '{original_name}': {e}");
            placeholder_text(original_name)
        }
    }
}

pub fn placeholder_text(original_name: &str) -> String {
    format!("Could not extract text. File info: {original_name}")
}
