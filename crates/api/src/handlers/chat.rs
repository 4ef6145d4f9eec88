//! Chat exchange with the academic assistant.
//!
//! Gateway failures never reach the client as errors: the reply carries a
//! fixed apology instead and the failure is logged.

use axum::{extract::State, Json};
use campus_core::models::chat::{
    ChatMessage, ChatRequest, ChatResponse, Sender, ERROR_REPLY_FALLBACK,
};
use std::sync::Arc;
use tracing::error;

use crate::{
    middleware::{auth::AuthUser, error_handling::AppError, extract::AppJson},
    ApiState,
};

#[axum::debug_handler]
pub async fn send_message(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
    AppJson(payload): AppJson<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    payload.validate()?;

    let message = ChatMessage::new(Sender::User, payload.message.clone());
    let reply_text = match state.assistant.send_message(&payload.message).await {
        Ok(text) => text,
        Err(e) => {
            error!("Chat gateway failed for user {}: {}", auth.id(), e);
            ERROR_REPLY_FALLBACK.to_string()
        }
    };

    Ok(Json(ChatResponse {
        message,
        reply: ChatMessage::new(Sender::Ai, reply_text),
    }))
}
