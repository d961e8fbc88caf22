//! Question/answer turns over a document

use legal_ai::LegalAi;
use shared_types::{ChatTurn, Document};
use tracing::{info, warn};

use super::PipelineError;
use crate::store::DocumentStore;

pub struct ChatPipeline<'a> {
    ai: &'a LegalAi,
    store: &'a DocumentStore,
}

impl<'a> ChatPipeline<'a> {
    pub fn new(ai: &'a LegalAi, store: &'a DocumentStore) -> Self {
        Self { ai, store }
    }

    /// Ask `question` about `document` and record the turn.
    ///
    /// The history only ever grows by complete turns: if the model call or
    /// the save fails, `document.chat_history` is left as it was.
    pub async fn ask(&self, document: &mut Document, question: &str) -> Result<String, PipelineError> {
        if question.trim().is_empty() {
            return Err(PipelineError::EmptyQuestion);
        }

        let answer = self
            .ai
            .chat(&document.original_text, question, &document.chat_history)
            .await?;

        document.chat_history.push(ChatTurn::new(question, answer.clone()));
        document.touch();

        if let Err(e) = self.store.save(document).await {
            warn!("Dropping chat turn for document {}: {}", document.id, e);
            document.chat_history.pop();
            return Err(e.into());
        }

        info!(
            "Answered chat question on document {} ({} turns)",
            document.id,
            document.chat_history.len()
        );
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use legal_ai::{AiError, MockModel};
    use pretty_assertions::assert_eq;
    use shared_types::FileKind;
    use std::sync::Arc;

    async fn setup(model: MockModel) -> (LegalAi, DocumentStore, Document) {
        let store = DocumentStore::in_memory().await.unwrap();
        let doc = Document::new(
            "user-1",
            "Lease",
            "lease.txt",
            FileKind::Text,
            "Rent is Rs. 25,000 per month.",
        );
        store.insert(&doc).await.unwrap();
        (LegalAi::new(Arc::new(model)), store, doc)
    }

    #[tokio::test]
    async fn successful_turn_is_appended_and_persisted() {
        let (ai, store, mut doc) = setup(MockModel::replying("Rs. 25,000 per month.")).await;

        let answer = ChatPipeline::new(&ai, &store)
            .ask(&mut doc, "What is the rent?")
            .await
            .unwrap();
        assert_eq!(answer, "Rs. 25,000 per month.");
        assert_eq!(doc.chat_history.len(), 1);
        assert_eq!(doc.chat_history[0].question, "What is the rent?");

        let stored = store.get("user-1", &doc.id).await.unwrap().unwrap();
        assert_eq!(stored.chat_history, doc.chat_history);
    }

    #[tokio::test]
    async fn failed_model_call_leaves_history_unchanged() {
        let (ai, store, mut doc) = setup(
            MockModel::replying("second answer").then(Ok("first answer".into())),
        )
        .await;
        let pipeline = ChatPipeline::new(&ai, &store);
        pipeline.ask(&mut doc, "First?").await.unwrap();

        let failing = LegalAi::new(Arc::new(MockModel::failing(AiError::Unknown(
            "timeout".into(),
        ))));
        let err = ChatPipeline::new(&failing, &store)
            .ask(&mut doc, "Second?")
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Ai(AiError::Unknown(_))));
        assert_eq!(doc.chat_history.len(), 1);

        let stored = store.get("user-1", &doc.id).await.unwrap().unwrap();
        assert_eq!(stored.chat_history.len(), 1);
        assert_eq!(stored.chat_history[0].answer, "first answer");
    }

    #[tokio::test]
    async fn failed_save_rolls_back_turn() {
        let (ai, store, mut doc) = setup(MockModel::replying("answer")).await;
        store.delete("user-1", &doc.id).await.unwrap();

        let err = ChatPipeline::new(&ai, &store)
            .ask(&mut doc, "Still there?")
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Store(_)));
        assert!(doc.chat_history.is_empty());
    }

    #[tokio::test]
    async fn empty_question_is_rejected_before_model_call() {
        let model = Arc::new(MockModel::replying("unused"));
        let store = DocumentStore::in_memory().await.unwrap();
        let ai = LegalAi::new(model.clone());
        let mut doc = Document::new("user-1", "Lease", "lease.txt", FileKind::Text, "text");

        let err = ChatPipeline::new(&ai, &store)
            .ask(&mut doc, "   ")
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::EmptyQuestion));
        assert!(model.prompts().is_empty());
    }

    #[tokio::test]
    async fn question_is_recorded_as_asked() {
        let (ai, store, mut doc) = setup(MockModel::replying("Rs. 25,000.")).await;

        ChatPipeline::new(&ai, &store)
            .ask(&mut doc, "  What is the rent?\n")
            .await
            .unwrap();

        let stored = store.get("user-1", &doc.id).await.unwrap().unwrap();
        assert_eq!(stored.chat_history[0].question, "  What is the rent?\n");
    }
}
