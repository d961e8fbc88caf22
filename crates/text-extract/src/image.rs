//! Raster images, recognized through an [`OcrEngine`]

use std::path::Path;

use tracing::debug;

use crate::{ExtractionError, OcrEngine};

pub async fn extract(path: &Path, engine: &dyn OcrEngine) -> Result<String, ExtractionError> {
    let mime_type = image_mime_type(path)?;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ExtractionError::io(path, e))?;

    debug!("Running OCR on {} ({} bytes, {})", path.display(), bytes.len(), mime_type);
    engine.recognize(&bytes, &mime_type).await
}

/// MIME type of an image file, guessed from its extension.
pub fn image_mime_type(path: &Path) -> Result<String, ExtractionError> {
    let guess = mime_guess::from_path(path).first();
    match guess {
        Some(mime) if mime.type_() == mime_guess::mime::IMAGE => Ok(mime.essence_str().to_string()),
        Some(mime) => Err(ExtractionError::Unsupported(mime.essence_str().to_string())),
        None => Err(ExtractionError::Unsupported(format!(
            "unknown image format: {}",
            path.display()
        ))),
    }
}
