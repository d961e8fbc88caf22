//! Plain-text files, read verbatim

use std::path::Path;

use shared_types::FileKind;

use crate::ExtractionError;

/// Read `path` as UTF-8 without any transformation.
pub async fn extract(path: &Path) -> Result<String, ExtractionError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ExtractionError::io(path, e))?;

    String::from_utf8(bytes).map_err(|e| ExtractionError::Corrupt {
        kind: FileKind::Text,
        reason: format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
    })
}
