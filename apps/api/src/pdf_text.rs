//! PDF text extraction for uploaded documents.
//!
//! Operates on in-memory bytes (uploads never touch disk). Extraction is
//! CPU-bound; callers run it under `tokio::task::spawn_blocking`.

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Extracts the concatenated plain text of every page, in page order.
///
/// Rejects non-PDF input, malformed PDFs, and PDFs with no extractable text
/// (e.g. image-only scans) with a validation error.
pub fn extract_text(bytes: &[u8]) -> Result<String, AppError> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(AppError::Validation(
            "Uploaded file is not a PDF".to_string(),
        ));
    }

    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Validation(format!("Failed to read PDF: {e}")))?;

    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "No text could be extracted from the PDF".to_string(),
        ));
    }

    Ok(text)
}
