// src/widget.rs
//! The chat widget as a small event-driven state machine.
//!
//! `Idle --submit--> AwaitingReply --resolve--> Idle`. The transcript is
//! append-only and lives only as long as the widget.

use reqwest::Client;

use crate::message::{ChatMessage, ChatRequest, ReplyBody};

pub const GREETING: &str = "Hi! How can I assist you today?";
pub const CLIENT_FALLBACK: &str = "Sorry, something went wrong!";
pub const TYPING_INDICATOR: &str = "Typing...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetStatus {
    Idle,
    AwaitingReply,
}

#[derive(Debug, Clone)]
pub struct ChatWidget {
    open: bool,
    input: String,
    transcript: Vec<ChatMessage>,
    status: WidgetStatus,
}

impl Default for ChatWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatWidget {
    pub fn new() -> Self {
        Self {
            open: false,
            input: String::new(),
            transcript: vec![ChatMessage::assistant(GREETING)],
            status: WidgetStatus::Idle,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn status(&self) -> WidgetStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == WidgetStatus::AwaitingReply
    }

    /// Move the typed input into the transcript and return it for sending.
    ///
    /// Returns `None` for blank input or while a reply is still pending.
    pub fn submit(&mut self) -> Option<String> {
        if self.is_loading() || self.input.trim().is_empty() {
            return None;
        }
        let message = std::mem::take(&mut self.input);
        self.transcript.push(ChatMessage::user(message.clone()));
        self.status = WidgetStatus::AwaitingReply;
        Some(message)
    }

    /// Record the outcome of the pending request. Ignored when idle.
    pub fn resolve<E>(&mut self, outcome: Result<ReplyBody, E>) {
        if !self.is_loading() {
            return;
        }
        let content = match outcome {
            Ok(ReplyBody::Reply { response }) => response,
            Ok(ReplyBody::Error { error }) => error,
            Err(_) => CLIENT_FALLBACK.to_string(),
        };
        self.transcript.push(ChatMessage::assistant(content));
        self.status = WidgetStatus::Idle;
    }

    /// Submit the current input and wait for the backend's answer.
    ///
    /// Returns `false` when there was nothing to send.
    pub async fn send(&mut self, client: &ChatClient) -> bool {
        let Some(message) = self.submit() else {
            return false;
        };
        let outcome = client.send(&message).await;
        if let Err(e) = &outcome {
            tracing::warn!(error = %e, "chat request failed");
        }
        self.resolve(outcome);
        true
    }
}

/// HTTP client for the `/api/chat` route.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    endpoint: String,
}

impl ChatClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/api/chat", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post one message. Error bodies (4xx/5xx) decode as [`ReplyBody::Error`].
    pub async fn send(&self, message: &str) -> Result<ReplyBody, reqwest::Error> {
        let body = ChatRequest { message: Some(message.to_string()) };
        self.client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?
            .json::<ReplyBody>()
            .await
    }
}
