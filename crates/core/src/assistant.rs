use async_trait::async_trait;

use crate::errors::CampusResult;

/// Text-in/text-out collaborator behind the chat endpoint.
///
/// Implementations return the model's reply, or a fixed fallback when the
/// model answers without text. Transport failures are returned as
/// [`CampusError::Gateway`](crate::errors::CampusError::Gateway) and left to
/// the caller to present.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn send_message(&self, prompt: &str) -> CampusResult<String>;
}
