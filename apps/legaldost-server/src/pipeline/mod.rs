//! Multi-stage document workflows
//!
//! - [`AnalysisPipeline`]: model analysis, rule scan, violation merge, persist
//! - [`ChatPipeline`]: one question/answer turn appended to the history

pub mod analysis;
pub mod chat;

use legal_ai::AiError;
use thiserror::Error;

use crate::store::StoreError;

pub use analysis::{merge_violations, AnalysisPipeline};
pub use chat::ChatPipeline;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ai(#[from] AiError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Question is required")]
    EmptyQuestion,
}
