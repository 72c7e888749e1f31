//! Client for the external narrative generation service.
//!
//! The service is treated as an opaque text-generation capability: given the
//! update's metrics and notes it returns one text block formatted with four
//! markdown-style headers. Failures surface once as an [`UpstreamError`];
//! there is no retry, streaming, or partial result here. Retry policy, if
//! wanted, belongs to the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// System prompt sent with every generation request.
pub const SYSTEM_PROMPT: &str = "You are an expert startup advisor helping founders write \
     professional investor updates. Focus on clarity, transparency, and maintaining \
     investor confidence.";

/// Input fields for one generation request. All values are passed through
/// verbatim; empty strings are fine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NarrativeRequest {
    pub revenue: String,
    pub burn_rate: String,
    pub runway: String,
    pub growth: String,
    pub highlights: String,
    pub challenges: String,
    pub asks: String,
}

impl NarrativeRequest {
    /// Builds the user prompt, including the exact four-header output format
    /// the section parser expects.
    pub fn user_prompt(&self) -> String {
        format!(
            "Generate a professional investor update summary based on the following data:\n\n\
             Financial Metrics:\n\
             - Monthly Recurring Revenue: {revenue}\n\
             - Monthly Burn Rate: {burn_rate}\n\
             - Runway: {runway}\n\
             - Growth Rate: {growth}\n\n\
             Key Highlights:\n{highlights}\n\n\
             Current Challenges:\n{challenges}\n\n\
             Investor Asks:\n{asks}\n\n\
             Please generate a structured investor update with the following format:\n\n\
             ## Executive Summary\n\
             [2-3 sentences summarizing the overall performance and outlook]\n\n\
             ## Key Highlights\n\
             \u{2022} [Highlight 1]\n\
             \u{2022} [Highlight 2]\n\
             \u{2022} [Highlight 3]\n\n\
             ## Current Challenges & Mitigation\n\
             [Transparent discussion of challenges and how you're addressing them]\n\n\
             ## How You Can Help\n\
             \u{2022} [Specific ask 1]\n\
             \u{2022} [Specific ask 2]\n\
             \u{2022} [Specific ask 3]\n\n\
             Keep the tone professional, confident, and transparent. Focus on measurable \
             achievements and be specific about challenges and asks.",
            revenue = self.revenue,
            burn_rate = self.burn_rate,
            runway = self.runway,
            growth = self.growth,
            highlights = self.highlights,
            challenges = self.challenges,
            asks = self.asks,
        )
    }
}

/// Single failure signal for the upstream service.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("narrative request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("narrative service returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("narrative service returned an empty or malformed response")]
    EmptyResponse,
}

/// Capability interface for narrative generation.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// Generates the narrative text for one update. One attempt, one result.
    async fn generate(&self, request: &NarrativeRequest) -> Result<String, UpstreamError>;
}

/// Configuration for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Base URL, e.g. "https://api.openai.com/v1".
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_key: None,
            timeout_secs: 60,
            max_tokens: 1000,
            temperature: 0.7,
        }
    }
}

impl OpenAiConfig {
    /// Builds a config from already-resolved environment values, falling back
    /// to defaults for anything unset.
    pub fn from_env_values(
        api_key: Option<String>,
        base_url: Option<String>,
        model: Option<String>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            base_url: base_url.unwrap_or(defaults.base_url),
            model: model.unwrap_or(defaults.model),
            api_key,
            ..defaults
        }
    }
}

/// Narrative generator backed by an OpenAI-compatible chat-completions API.
pub struct OpenAiGenerator {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiGenerator {
    pub fn new(config: OpenAiConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl NarrativeGenerator for OpenAiGenerator {
    async fn generate(&self, request: &NarrativeRequest) -> Result<String, UpstreamError> {
        let user_prompt = request.user_prompt();
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let mut req = self.client.post(&url).json(&body);
        if let Some(key) = &self.config.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "narrative service returned non-success");
            return Err(UpstreamError::Status(status));
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(UpstreamError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_carries_fields_and_headers() {
        let request = NarrativeRequest {
            revenue: "$125,000".into(),
            burn_rate: "$45,000".into(),
            runway: "18 months".into(),
            growth: "23%".into(),
            highlights: "Launched enterprise tier".into(),
            challenges: "Longer sales cycles".into(),
            asks: "Intros to fintech".into(),
        };
        let prompt = request.user_prompt();
        assert!(prompt.contains("Monthly Recurring Revenue: $125,000"));
        assert!(prompt.contains("Launched enterprise tier"));
        assert!(prompt.contains("## Executive Summary"));
        assert!(prompt.contains("## Key Highlights"));
        assert!(prompt.contains("## Current Challenges & Mitigation"));
        assert!(prompt.contains("## How You Can Help"));
    }

    #[test]
    fn test_config_env_values_override_defaults() {
        let config = OpenAiConfig::from_env_values(
            Some("sk-test".into()),
            Some("http://localhost:11434/v1".into()),
            None,
        );
        assert_eq!(config.base_url, "http://localhost:11434/v1");
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
    }
}
