use std::time::Duration;

use async_trait::async_trait;
use campus_core::{
    assistant::ChatGateway,
    errors::{CampusError, CampusResult},
    models::chat::EMPTY_REPLY_FALLBACK,
};
use eyre::{eyre, Result, WrapErr};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AssistantConfig;

const SYSTEM_INSTRUCTION: &str = "You are an academic assistant for students and faculty. \
Provide concise and helpful information based on academic queries. \
Keep responses professional and encouraging.";

/// [`ChatGateway`] backed by the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiGateway {
    http: reqwest::Client,
    config: AssistantConfig,
}

impl GeminiGateway {
    pub fn new(config: AssistantConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .wrap_err("Failed to build HTTP client")?;

        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base(),
            self.config.model()
        )
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| eyre!("GEMINI_API_KEY is not configured"))?;

        debug!("Sending chat prompt to {}", self.config.model());

        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&GenerateContentRequest::new(prompt))
            .send()
            .await
            .wrap_err("Gemini request failed")?;

        let status = resp.status();
        let body = resp.text().await.wrap_err("Gemini response read failed")?;

        if !status.is_success() {
            return Err(eyre!("Gemini API error: {} - {}", status, body));
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).wrap_err("Gemini response parse failed")?;

        Ok(reply_text(&parsed))
    }
}

#[async_trait]
impl ChatGateway for GeminiGateway {
    async fn send_message(&self, prompt: &str) -> CampusResult<String> {
        self.generate(prompt).await.map_err(CampusError::Gateway)
    }
}

/// Concatenated text of the first candidate, or the fixed fallback when the
/// model produced none.
pub fn reply_text(response: &GenerateContentResponse) -> String {
    let text = response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        EMPTY_REPLY_FALLBACK.to_string()
    } else {
        text
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
}

impl GenerateContentRequest {
    pub fn new(prompt: &str) -> Self {
        Self {
            system_instruction: Content::text(None, SYSTEM_INSTRUCTION),
            contents: vec![Content::text(Some("user"), prompt)],
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}
