//! The `TextGenerator` trait, the closed provider set, and the factory.

use crate::config::ProviderConfig;
use crate::error::{LlmError, Result};
use crate::remote::{ClaudeClient, GeminiClient};
use crate::types::{GenerationRequest, GenerationResponse};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Core trait for text-generation providers.
///
/// Implementations handle the specifics of converting the request,
/// making the API call, and normalizing the response for their
/// particular provider. One `generate` call performs exactly one
/// outbound request; retry policy lives with the caller.
///
/// Implementations must be `Send + Sync`; share across tasks with
/// `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync + fmt::Debug {
    /// Generate text from the given request.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] for network failures, authentication
    /// errors, rate limiting, and malformed provider responses.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse>;

    /// Clone this generator into a boxed trait object.
    fn clone_box(&self) -> Box<dyn TextGenerator>;
}

/// Enable cloning for boxed TextGenerator trait objects.
impl Clone for Box<dyn TextGenerator> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Supported text-generation providers.
///
/// This is a closed set: adding a provider means adding a variant here
/// and a `TextGenerator` implementation in `remote`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Claude,
    Gemini,
}

impl FromStr for Provider {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "claude" => Ok(Provider::Claude),
            "gemini" => Ok(Provider::Gemini),
            other => Err(LlmError::UnsupportedProvider(other.to_string())),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Claude => write!(f, "claude"),
            Provider::Gemini => write!(f, "gemini"),
        }
    }
}

/// Create a generator for the selected provider.
///
/// Performs no network I/O. Fails with [`LlmError::ApiKeyNotFound`]
/// when the key is empty, before any client is constructed.
pub fn create_generator(provider: Provider, api_key: &str) -> Result<Arc<dyn TextGenerator>> {
    if api_key.trim().is_empty() {
        return Err(LlmError::ApiKeyNotFound(provider.to_string()));
    }

    Ok(match provider {
        Provider::Claude => Arc::new(ClaudeClient::new(ProviderConfig::new(
            api_key,
            ClaudeClient::DEFAULT_BASE_URL,
            ClaudeClient::DEFAULT_MODEL,
        ))),
        Provider::Gemini => Arc::new(GeminiClient::new(ProviderConfig::new(
            api_key,
            GeminiClient::DEFAULT_BASE_URL,
            GeminiClient::DEFAULT_MODEL,
        ))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("claude".parse::<Provider>().unwrap(), Provider::Claude);
        assert_eq!("gemini".parse::<Provider>().unwrap(), Provider::Gemini);
        assert_eq!("GEMINI".parse::<Provider>().unwrap(), Provider::Gemini);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let err = "mistral".parse::<Provider>().unwrap_err();
        assert!(matches!(err, LlmError::UnsupportedProvider(ref name) if name == "mistral"));
    }

    #[test]
    fn test_provider_roundtrip_display() {
        assert_eq!(Provider::Claude.to_string(), "claude");
        assert_eq!(Provider::Gemini.to_string(), "gemini");
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let err = create_generator(Provider::Claude, "").unwrap_err();
        assert!(matches!(err, LlmError::ApiKeyNotFound(_)));
        assert!(err.is_auth_error());

        let err = create_generator(Provider::Gemini, "   ").unwrap_err();
        assert!(matches!(err, LlmError::ApiKeyNotFound(_)));
    }

    #[test]
    fn test_factory_creates_generator() {
        assert!(create_generator(Provider::Claude, "test-key").is_ok());
        assert!(create_generator(Provider::Gemini, "test-key").is_ok());
    }
}
