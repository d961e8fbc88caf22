//! PDF text extraction
//!
//! Uses pdf-extract to produce a single linear text stream. Parsing is CPU
//! bound and can panic on malformed input, so it runs on the blocking pool
//! and a panic is reported as a corrupt file.

use std::path::Path;

use shared_types::FileKind;
use tracing::warn;

use crate::ExtractionError;

pub async fn extract(path: &Path) -> Result<String, ExtractionError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ExtractionError::io(path, e))?;

    tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
        .await
        .map_err(|e| {
            warn!("PDF extraction task aborted: {}", e);
            corrupt(format!("parser aborted: {e}"))
        })?
}

/// Extract text from PDF bytes using pdf-extract.
fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| corrupt(e.to_string()))
}

fn corrupt(reason: String) -> ExtractionError {
    ExtractionError::Corrupt {
        kind: FileKind::Pdf,
        reason,
    }
}
