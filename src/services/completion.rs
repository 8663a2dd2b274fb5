// src/services/completion.rs
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CompletionError;
use crate::message::ChatMessage;

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant for a marketing website. \
Provide concise, friendly, and professional response.";

pub const FALLBACK_REPLY: &str = "Sorry, something went wrong. Please try again.";

/// A hosted model that turns a prompt into a single text reply.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError>;
}

/// Build the two-turn prompt sent for every inbound message.
pub fn build_prompt(input: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(input)]
}

#[derive(Clone)]
pub struct CompletionService {
    model: Arc<dyn ChatModel>,
}

impl std::fmt::Debug for CompletionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionService").finish_non_exhaustive()
    }
}

impl CompletionService {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Ask the model once. Failures are logged and replaced by [`FALLBACK_REPLY`].
    pub async fn reply(&self, input: &str) -> String {
        let prompt = build_prompt(input);
        match self.model.complete(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "completion failed, sending fallback reply");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}
