use axum::{Json, body::Bytes, extract::State};

use crate::{
    error::{AppError, MESSAGE_REQUIRED},
    message::{ChatRequest, ChatResponse},
    state::SharedState,
};

/// The body is read as JSON whatever `Content-Type` the client sent.
pub async fn chat_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let payload: ChatRequest = serde_json::from_slice(&body)?;

    let message = match payload.message {
        Some(m) if !m.is_empty() => m,
        _ => {
            tracing::warn!("chat request without a message");
            return Err(AppError::BadRequest(MESSAGE_REQUIRED.to_string()));
        }
    };

    let response = state.completion.reply(&message).await;
    Ok(Json(ChatResponse { response }))
}
