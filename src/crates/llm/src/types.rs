//! Request and response value types for text generation.
//!
//! Both types are plain immutable values. A [`GenerationRequest`] is
//! constructed fresh for every attempt; nothing in this crate holds on
//! to one after the call returns.

use serde::{Deserialize, Serialize};

/// A single text-generation request.
///
/// # Example
///
/// ```rust,ignore
/// let request = GenerationRequest::new(system_prompt, description)
///     .with_max_tokens(4096)
///     .with_temperature(0.3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// System prompt with generation guidelines.
    pub system_prompt: String,

    /// User's natural language request.
    pub user_prompt: String,

    /// Maximum tokens in the response.
    pub max_tokens: u32,

    /// Sampling temperature (0.0-1.0).
    pub temperature: f32,
}

impl GenerationRequest {
    /// Create a new request with default sampling parameters.
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            max_tokens: 4096,
            temperature: 0.7,
        }
    }

    /// Set the maximum number of tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature.
    ///
    /// Lower values (0.0-0.3) are more deterministic; higher values
    /// produce more varied output.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Response from a text-generation provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Generated text content.
    pub content: String,

    /// Model identifier used for generation.
    pub model: String,

    /// Total token usage, when the provider reports it.
    pub usage_tokens: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = GenerationRequest::new("system", "user")
            .with_max_tokens(1024)
            .with_temperature(0.3);

        assert_eq!(request.system_prompt, "system");
        assert_eq!(request.user_prompt, "user");
        assert_eq!(request.max_tokens, 1024);
        assert_eq!(request.temperature, 0.3);
    }

    #[test]
    fn test_request_defaults() {
        let request = GenerationRequest::new("s", "u");
        assert_eq!(request.max_tokens, 4096);
        assert_eq!(request.temperature, 0.7);
    }
}
