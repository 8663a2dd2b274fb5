// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::completion::{ChatModel, CompletionService};
use crate::services::openai::OpenAiClient;

pub type SharedState = Arc<AppState>;

#[derive(Debug)]
pub struct AppState {
    pub completion: CompletionService,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self::with_model(Arc::new(OpenAiClient::from_config(config)))
    }

    pub fn with_model(model: Arc<dyn ChatModel>) -> Self {
        Self {
            completion: CompletionService::new(model),
        }
    }
}
