//! OCR through a vision-capable generative model

use std::sync::Arc;

use async_trait::async_trait;
use text_extract::{ExtractionError, OcrEngine};
use tracing::{debug, warn};

use crate::model::GenerativeModel;
use crate::prompts::OCR_PROMPT;

/// [`OcrEngine`] that sends the image inline with a transcription prompt
pub struct ModelOcr {
    model: Arc<dyn GenerativeModel>,
}

impl ModelOcr {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl OcrEngine for ModelOcr {
    async fn recognize(&self, image: &[u8], mime_type: &str) -> Result<String, ExtractionError> {
        debug!(
            "Transcribing {} byte {} image with {}",
            image.len(),
            mime_type,
            self.model.name()
        );

        let text = self
            .model
            .generate_with_image(OCR_PROMPT, mime_type, image)
            .await
            .map_err(|e| {
                warn!("Vision OCR failed: {}", e);
                ExtractionError::Ocr(e.to_string())
            })?;

        Ok(text.trim().to_string())
    }
}
