use eyre::{eyre, Result};
use serde::Deserialize;
use std::env;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Configuration for the chat assistant.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Gemini API key. Without one every chat request fails and the caller
    /// falls back to its error reply.
    pub api_key: Option<String>,
    /// Model name (defaults to `gemini-2.5-flash`)
    pub model: Option<String>,
    /// Base URL of the Gemini API
    pub api_base: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl AssistantConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("GEMINI_API_KEY").ok().filter(|key| !key.is_empty());
        let model = env::var("GEMINI_MODEL").ok();
        let api_base = env::var("GEMINI_API_BASE").ok();

        let timeout_seconds = match env::var("GEMINI_TIMEOUT_SECONDS") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| eyre!("GEMINI_TIMEOUT_SECONDS must be a valid u64"))?,
            Err(_) => 30,
        };

        Ok(Self {
            api_key,
            model,
            api_base,
            timeout_seconds,
        })
    }

    /// Get the model name (defaults to `gemini-2.5-flash` if not set)
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Get the API base URL without a trailing slash
    pub fn api_base(&self) -> &str {
        self.api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
    }
}
