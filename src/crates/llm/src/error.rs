//! Error types for the provider gateway.

use thiserror::Error;

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur when working with LLM providers.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Provider name outside the supported set.
    #[error("Unsupported provider: {0} (expected 'claude' or 'gemini')")]
    UnsupportedProvider(String),

    /// No API key supplied for the selected provider.
    #[error("API key not set for provider: {0}")]
    ApiKeyNotFound(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API authentication failed.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Invalid response from provider.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// General provider error.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LlmError {
    /// Check if this error is due to authentication.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            LlmError::Authentication(_) | LlmError::ApiKeyNotFound(_)
        )
    }

    /// Check if this error was raised before any network call.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            LlmError::UnsupportedProvider(_) | LlmError::ApiKeyNotFound(_) | LlmError::Config(_)
        )
    }
}
