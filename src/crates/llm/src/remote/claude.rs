//! Anthropic Claude client implementation.
//!
//! Talks to the Anthropic Messages API. The system prompt travels in
//! the dedicated `system` field; the user prompt becomes the single
//! conversation message.

use crate::config::ProviderConfig;
use crate::error::{LlmError, Result};
use crate::generator::TextGenerator;
use crate::types::{GenerationRequest, GenerationResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Claude API client.
#[derive(Debug, Clone)]
pub struct ClaudeClient {
    config: ProviderConfig,
    client: Client,
}

impl ClaudeClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.anthropic.com";
    pub const DEFAULT_MODEL: &'static str = "claude-sonnet-4-5-20250929";

    /// Create a new Claude client with the given configuration.
    pub fn new(config: ProviderConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Build the Messages API request body.
    fn build_request(&self, request: &GenerationRequest) -> ClaudeRequest {
        ClaudeRequest {
            model: self.config.model.clone(),
            messages: vec![ClaudeMessage {
                role: "user".to_string(),
                content: request.user_prompt.clone(),
            }],
            system: Some(request.system_prompt.clone()),
            max_tokens: request.max_tokens,
            temperature: Some(request.temperature),
        }
    }

    /// Convert a Claude response into the gateway response shape.
    ///
    /// Claude returns content blocks; the text blocks are joined. Token
    /// usage is reported split, so input and output are summed.
    fn convert_response(&self, claude_resp: ClaudeResponse) -> GenerationResponse {
        let content = claude_resp
            .content
            .iter()
            .filter_map(|c| {
                if c.content_type == "text" {
                    c.text.clone()
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        let usage_tokens = Some(claude_resp.usage.input_tokens + claude_resp.usage.output_tokens);

        GenerationResponse {
            content,
            model: claude_resp.model,
            usage_tokens,
        }
    }
}

#[async_trait]
impl TextGenerator for ClaudeClient {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        let url = format!("{}/v1/messages", self.config.base_url);
        let req_body = self.build_request(&request);

        debug!(model = %self.config.model, "sending Claude generation request");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&req_body)
            .send()
            .await
            .map_err(LlmError::Http)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(super::classify_api_error("Claude", status, error_text));
        }

        let claude_resp: ClaudeResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        Ok(self.convert_response(claude_resp))
    }

    fn clone_box(&self) -> Box<dyn TextGenerator> {
        Box::new(self.clone())
    }
}

// Claude API types
#[derive(Debug, Serialize)]
struct ClaudeRequest {
    model: String,
    messages: Vec<ClaudeMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ClaudeMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    content: Vec<ClaudeContent>,
    model: String,
    usage: ClaudeUsage,
}

#[derive(Debug, Deserialize)]
struct ClaudeContent {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClaudeUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> ClaudeClient {
        ClaudeClient::new(ProviderConfig::new(
            "test-key",
            ClaudeClient::DEFAULT_BASE_URL,
            ClaudeClient::DEFAULT_MODEL,
        ))
    }

    #[test]
    fn test_request_body() {
        let client = test_client();
        let request = GenerationRequest::new("You are helpful", "Hello")
            .with_max_tokens(1024)
            .with_temperature(0.3);

        let body = client.build_request(&request);

        assert_eq!(body.system.as_deref(), Some("You are helpful"));
        assert_eq!(body.messages.len(), 1);
        assert_eq!(body.messages[0].role, "user");
        assert_eq!(body.messages[0].content, "Hello");
        assert_eq!(body.max_tokens, 1024);
    }

    #[test]
    fn test_response_conversion_sums_tokens() {
        let client = test_client();
        let raw = serde_json::json!({
            "content": [{"type": "text", "text": "---\n- hosts: localhost\n"}],
            "model": "claude-sonnet-4-5-20250929",
            "usage": {"input_tokens": 120, "output_tokens": 30}
        });
        let resp: ClaudeResponse = serde_json::from_value(raw).unwrap();

        let converted = client.convert_response(resp);

        assert_eq!(converted.content, "---\n- hosts: localhost\n");
        assert_eq!(converted.usage_tokens, Some(150));
    }

    #[test]
    fn test_non_text_blocks_ignored() {
        let client = test_client();
        let raw = serde_json::json!({
            "content": [
                {"type": "thinking", "text": "hmm"},
                {"type": "text", "text": "answer"}
            ],
            "model": "claude-sonnet-4-5-20250929",
            "usage": {"input_tokens": 1, "output_tokens": 1}
        });
        let resp: ClaudeResponse = serde_json::from_value(raw).unwrap();

        assert_eq!(client.convert_response(resp).content, "answer");
    }
}
