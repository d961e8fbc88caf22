//! Document analysis, explanation and chat over a [`GenerativeModel`]

use std::sync::Arc;

use shared_types::{Analysis, ChatTurn};
use tracing::{info, warn};

use crate::error::AiError;
use crate::fallback::fallback_analysis;
use crate::model::GenerativeModel;
use crate::parse::parse_analysis;
use crate::prompts::{analysis_prompt, chat_prompt, explain_prompt};

pub const DEFAULT_CHAT_CONTEXT_CHARS: usize = 3000;
pub const DEFAULT_CHAT_HISTORY_TURNS: usize = 5;

/// How much of a document and its history goes into a chat prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatContext {
    /// Document text beyond this many characters is cut off
    pub max_document_chars: usize,
    /// Only the most recent turns are replayed
    pub history_turns: usize,
}

impl Default for ChatContext {
    fn default() -> Self {
        Self {
            max_document_chars: DEFAULT_CHAT_CONTEXT_CHARS,
            history_turns: DEFAULT_CHAT_HISTORY_TURNS,
        }
    }
}

/// Where an analysis came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSource {
    /// The model reply parsed as the requested JSON
    Model,
    /// The reply was unusable and the heuristic fallback filled in
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub analysis: Analysis,
    pub source: AnalysisSource,
}

/// Legal analysis client.
///
/// Each operation is exactly one model call; errors are classified but
/// never retried here.
#[derive(Clone)]
pub struct LegalAi {
    model: Arc<dyn GenerativeModel>,
    chat_context: ChatContext,
}

impl LegalAi {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self {
            model,
            chat_context: ChatContext::default(),
        }
    }

    pub fn with_chat_context(mut self, chat_context: ChatContext) -> Self {
        self.chat_context = chat_context;
        self
    }

    pub fn model(&self) -> &Arc<dyn GenerativeModel> {
        &self.model
    }

    /// Analyse `text` titled `title`.
    ///
    /// A reply that is not the requested JSON object is not an error: the
    /// heuristic fallback is used and [`AnalysisSource::Fallback`] reported.
    pub async fn analyze(&self, text: &str, title: &str) -> Result<AnalysisOutcome, AiError> {
        info!(
            "Analysing \"{}\" ({} chars) with {}",
            title,
            text.chars().count(),
            self.model.name()
        );

        let raw = self.model.generate(&analysis_prompt(text, title)).await?;

        match parse_analysis(&raw) {
            Ok(analysis) => Ok(AnalysisOutcome {
                analysis,
                source: AnalysisSource::Model,
            }),
            Err(e) => {
                warn!("Model reply for \"{}\" unusable ({}), using fallback analysis", title, e);
                Ok(AnalysisOutcome {
                    analysis: fallback_analysis(&raw, text),
                    source: AnalysisSource::Fallback,
                })
            }
        }
    }

    /// Explain a selected span of legal text in plain language.
    pub async fn explain(
        &self,
        text: &str,
        context: Option<&str>,
        document_kind: Option<&str>,
    ) -> Result<String, AiError> {
        info!("Explaining {} chars of selected text", text.chars().count());
        self.model
            .generate(&explain_prompt(text, context, document_kind))
            .await
    }

    /// Answer `question` about `document_text` given the prior `history`.
    pub async fn chat(
        &self,
        document_text: &str,
        question: &str,
        history: &[ChatTurn],
    ) -> Result<String, AiError> {
        let (excerpt, truncated) = truncate_chars(document_text, self.chat_context.max_document_chars);
        let recent = &history[history.len().saturating_sub(self.chat_context.history_turns)..];

        info!(
            "Chat question ({} prior turns, {} replayed, document truncated: {})",
            history.len(),
            recent.len(),
            truncated
        );

        self.model
            .generate(&chat_prompt(excerpt, truncated, recent, question))
            .await
    }
}

/// First `max_chars` characters of `text`, and whether anything was cut.
fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => (&text[..byte_index], true),
        None => (text, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MockModel;
    use pretty_assertions::assert_eq;
    use shared_types::RiskLevel;

    fn client(model: MockModel) -> (LegalAi, Arc<MockModel>) {
        let model = Arc::new(model);
        (LegalAi::new(model.clone()), model)
    }

    #[tokio::test]
    async fn analyze_uses_parsed_reply() {
        let (ai, model) = client(MockModel::replying(
            "```json\n{\"summary\":\"Lease\",\"riskLevel\":\"low\"}\n```",
        ));
        let outcome = ai.analyze("Rent is Rs. 25,000 per month.", "Lease").await.unwrap();
        assert_eq!(outcome.source, AnalysisSource::Model);
        assert_eq!(outcome.analysis.summary, "Lease");
        assert_eq!(outcome.analysis.risk_level, RiskLevel::Low);
        assert!(model.prompts()[0].contains("Document Title: Lease"));
    }

    #[tokio::test]
    async fn analyze_falls_back_on_prose_reply() {
        let (ai, _) = client(MockModel::replying("This looks like a high risk contract."));
        let outcome = ai
            .analyze("Early termination costs six months rent.", "Lease")
            .await
            .unwrap();
        assert_eq!(outcome.source, AnalysisSource::Fallback);
        assert_eq!(outcome.analysis.risk_level, RiskLevel::High);
        assert_eq!(outcome.analysis.highlights.len(), 1);
    }

    #[tokio::test]
    async fn analyze_propagates_model_errors() {
        let (ai, _) = client(MockModel::failing(AiError::AuthFailed));
        assert_eq!(ai.analyze("x", "y").await, Err(AiError::AuthFailed));
    }

    #[tokio::test]
    async fn chat_truncates_document_and_history() {
        let (ai, model) = client(MockModel::replying("**Direct Answer**\n• Yes"));
        let ai = ai.with_chat_context(ChatContext {
            max_document_chars: 10,
            history_turns: 2,
        });
        let history: Vec<_> = (1..=4)
            .map(|i| ChatTurn::new(format!("q{i}"), format!("a{i}")))
            .collect();

        let answer = ai
            .chat("₹25,000 rent payable monthly", "Is rent monthly?", &history)
            .await
            .unwrap();
        assert_eq!(answer, "**Direct Answer**\n• Yes");

        let prompt = &model.prompts()[0];
        assert!(prompt.contains("Document Content: ₹25,000 re...\n"));
        assert!(!prompt.contains("User: q2"));
        assert!(prompt.contains("User: q3\nAI: a3\n\nUser: q4\nAI: a4"));
    }

    #[tokio::test]
    async fn explain_passes_through_reply() {
        let (ai, model) = client(MockModel::replying("It means nobody is liable."));
        let explanation = ai.explain("no liability", None, Some("Lease")).await.unwrap();
        assert_eq!(explanation, "It means nobody is liable.");
        assert!(model.prompts()[0].contains("Document Type: Lease"));
    }

    #[test]
    fn truncation_is_by_characters() {
        assert_eq!(truncate_chars("abc", 3), ("abc", false));
        assert_eq!(truncate_chars("abcd", 3), ("abc", true));
        assert_eq!(truncate_chars("₹₹₹₹", 2), ("₹₹", true));
        assert_eq!(truncate_chars("", 0), ("", false));
    }
}
