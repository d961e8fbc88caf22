//! Generative-model client for legal documents
//!
//! [`LegalAi`] builds the prompts, makes exactly one model call per
//! operation and turns the reply into typed results. Analysis replies go
//! through a strict parser first ([`parse::parse_analysis`]) and through the
//! heuristic [`fallback::fallback_analysis`] when that fails, so a malformed
//! reply never fails an analysis. Transport failures are classified as
//! [`AiError`] and returned to the caller.
//!
//! The transport sits behind [`GenerativeModel`]: [`GeminiModel`] talks to
//! the Gemini REST API, [`MockModel`] replays scripted replies in tests.

pub mod client;
pub mod error;
pub mod fallback;
pub mod gemini;
pub mod model;
pub mod ocr;
pub mod parse;
pub mod prompts;

pub use client::{AnalysisOutcome, AnalysisSource, ChatContext, LegalAi};
pub use error::{AiError, ShapeError};
pub use gemini::{GeminiConfig, GeminiModel};
pub use model::{GenerativeModel, MockModel};
pub use ocr::ModelOcr;
