//! Transport seam between the client and a generative model

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AiError;

/// A text-generating model reachable over some transport.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Send a single text prompt and return the model's text reply.
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;

    /// Send a prompt together with one inline image.
    async fn generate_with_image(
        &self,
        prompt: &str,
        mime_type: &str,
        image: &[u8],
    ) -> Result<String, AiError>;

    /// Model identifier, for logging
    fn name(&self) -> &str;
}

/// Scripted model for tests.
///
/// Queued replies are consumed first, then the default reply repeats.
/// Every prompt is recorded.
pub struct MockModel {
    queued: Mutex<VecDeque<Result<String, AiError>>>,
    default_reply: Result<String, AiError>,
    prompts: Mutex<Vec<String>>,
}

impl MockModel {
    /// Always answers `reply`.
    pub fn replying(reply: &str) -> Self {
        Self::with_default(Ok(reply.to_string()))
    }

    /// Always fails with `error`.
    pub fn failing(error: AiError) -> Self {
        Self::with_default(Err(error))
    }

    fn with_default(default_reply: Result<String, AiError>) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            default_reply,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Queue a one-off reply ahead of the default.
    pub fn then(self, reply: Result<String, AiError>) -> Self {
        self.queued
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(reply);
        self
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn next_reply(&self, prompt: &str) -> Result<String, AiError> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(prompt.to_string());
        self.queued
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .unwrap_or_else(|| self.default_reply.clone())
    }
}

#[async_trait]
impl GenerativeModel for MockModel {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        self.next_reply(prompt)
    }

    async fn generate_with_image(
        &self,
        prompt: &str,
        _mime_type: &str,
        _image: &[u8],
    ) -> Result<String, AiError> {
        self.next_reply(prompt)
    }

    fn name(&self) -> &str {
        "mock"
    }
}
