// src/services/openai.rs
//! Client for OpenAI-compatible `chat/completions` endpoints.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::completion::ChatModel;
use crate::config::Config;
use crate::error::CompletionError;
use crate::message::ChatMessage;

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_key.clone(), config.base_url.clone(), config.model.clone())
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        let api_key = self.api_key.as_deref().ok_or(CompletionError::MissingApiKey)?;

        let body = CompletionRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| WireMessage { role: m.role.as_str(), content: &m.content })
                .collect(),
        };

        tracing::debug!(model = %self.model, turns = messages.len(), "requesting completion");

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(CompletionError::Api { status: status.as_u16(), body: text });
        }

        parse_reply(&text)
    }
}

/// Pull the first choice's text out of a completion response body.
pub fn parse_reply(body: &str) -> Result<String, CompletionError> {
    let parsed: CompletionResponse =
        serde_json::from_str(body).map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or(CompletionError::EmptyReply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Hello there!"}},
                                 {"message":{"role":"assistant","content":"ignored"}}]}"#;
        assert_eq!(parse_reply(body).unwrap(), "Hello there!");
    }

    #[test]
    fn no_choices_is_empty_reply() {
        assert!(matches!(parse_reply(r#"{"choices":[]}"#), Err(CompletionError::EmptyReply)));
        assert!(matches!(
            parse_reply(r#"{"choices":[{"message":{"content":null}}]}"#),
            Err(CompletionError::EmptyReply)
        ));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(parse_reply("<html>"), Err(CompletionError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        // Port 9 (discard) would hang or refuse; we must not get that far.
        let client = OpenAiClient::new(None, "http://127.0.0.1:9", "gpt-4o-mini");
        let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();
        assert!(matches!(err, CompletionError::MissingApiKey));
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let client = OpenAiClient::new(None, "https://api.openai.com/v1/", "m");
        assert_eq!(client.endpoint(), "https://api.openai.com/v1/chat/completions");
    }
}
