//! Application state for the LegalDost server

use std::sync::Arc;

use anyhow::Result;
use compliance_engine::ComplianceEngine;
use legal_ai::{GeminiModel, GenerativeModel, LegalAi, ModelOcr};
use text_extract::TextExtractor;
use tracing::info;

use crate::config::{Args, ServerConfig};
use crate::pipeline::{AnalysisPipeline, ChatPipeline};
use crate::store::DocumentStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: DocumentStore,
    pub ai: Arc<LegalAi>,
    pub extractor: TextExtractor,
    pub rules: ComplianceEngine,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Production wiring: SQLite store, Gemini model, vision OCR.
    pub async fn from_args(args: &Args) -> Result<Self> {
        let store = DocumentStore::connect(&args.database_url()).await?;
        let model: Arc<dyn GenerativeModel> = Arc::new(GeminiModel::new(args.gemini_config())?);
        info!("Using generative model {}", model.name());

        let config = args.server_config();
        tokio::fs::create_dir_all(&config.upload_dir).await?;

        Ok(Self::from_parts(store, model, config))
    }

    /// Assemble state around an existing store and model.
    ///
    /// The same model serves analysis, chat and image OCR.
    pub fn from_parts(
        store: DocumentStore,
        model: Arc<dyn GenerativeModel>,
        config: ServerConfig,
    ) -> Self {
        let ai = LegalAi::new(model.clone()).with_chat_context(config.chat_context);
        let extractor = TextExtractor::new().with_ocr(Arc::new(ModelOcr::new(model)));

        Self {
            store,
            ai: Arc::new(ai),
            extractor,
            rules: ComplianceEngine::new(),
            config: Arc::new(config),
        }
    }

    pub fn analysis_pipeline(&self) -> AnalysisPipeline<'_> {
        AnalysisPipeline::new(&self.ai, &self.rules, &self.store)
    }

    pub fn chat_pipeline(&self) -> ChatPipeline<'_> {
        ChatPipeline::new(&self.ai, &self.store)
    }
}
