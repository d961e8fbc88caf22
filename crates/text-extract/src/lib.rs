//! Text extraction for uploaded documents
//!
//! Turns a stored file plus its declared [`FileKind`] into raw text:
//!
//! - `pdf`: linear text stream via `pdf-extract`
//! - `image`: OCR through a pluggable [`OcrEngine`]
//! - `text`: the file contents verbatim
//!
//! Failures are reported as [`ExtractionError`]; callers mark the document
//! failed rather than treating them as fatal.

pub mod image;
pub mod pdf;
pub mod text;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

pub use shared_types::FileKind;

/// Text extraction errors
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt {kind} file: {reason}")]
    Corrupt { kind: FileKind, reason: String },

    #[error("Unsupported file type: {0}")]
    Unsupported(String),

    #[error("No OCR engine configured")]
    OcrUnavailable,

    #[error("OCR failed: {0}")]
    Ocr(String),
}

impl ExtractionError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        ExtractionError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Optical character recognition over raster image bytes
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognize the text in `image`, whose MIME type is `mime_type`.
    async fn recognize(&self, image: &[u8], mime_type: &str) -> Result<String, ExtractionError>;
}

/// Dispatches extraction by file kind
#[derive(Clone, Default)]
pub struct TextExtractor {
    ocr: Option<Arc<dyn OcrEngine>>,
}

impl TextExtractor {
    /// Extractor without OCR; image files fail with [`ExtractionError::OcrUnavailable`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ocr(mut self, engine: Arc<dyn OcrEngine>) -> Self {
        self.ocr = Some(engine);
        self
    }

    /// Extract raw text from the file at `path`.
    pub async fn extract(&self, path: &Path, kind: FileKind) -> Result<String, ExtractionError> {
        debug!("Extracting {} file: {}", kind, path.display());

        let text = match kind {
            FileKind::Pdf => pdf::extract(path).await?,
            FileKind::Image => {
                let engine = self.ocr.as_deref().ok_or(ExtractionError::OcrUnavailable)?;
                image::extract(path, engine).await?
            }
            FileKind::Text => text::extract(path).await?,
        };

        debug!("Extracted {} characters from {}", text.chars().count(), path.display());
        Ok(text)
    }
}
