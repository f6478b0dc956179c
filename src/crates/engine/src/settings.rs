//! Environment-sourced settings.
//!
//! Built once at the entry point and passed by value; nothing mutates
//! shared configuration during a run, so concurrent runs with
//! different credentials cannot interfere.

use llm::{LlmError, Provider};
use std::time::Duration;

const DEFAULT_VALIDATION_TIMEOUT_SECS: u64 = 30;

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Selected text-generation provider.
    pub provider: Provider,

    /// Anthropic API key, when configured.
    pub anthropic_api_key: Option<String>,

    /// Google Gemini API key, when configured.
    pub gemini_api_key: Option<String>,

    /// Deadline for each sandboxed validation phase.
    pub validation_timeout: Duration,
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// Reads `LLM_PROVIDER` (defaults to `gemini`), `ANTHROPIC_API_KEY`,
    /// `GEMINI_API_KEY`, and `VALIDATION_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LlmError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = match lookup("LLM_PROVIDER") {
            Some(name) => name.parse::<Provider>()?,
            None => Provider::Gemini,
        };

        let validation_timeout = match lookup("VALIDATION_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    LlmError::Config(format!("invalid VALIDATION_TIMEOUT_SECS: {}", raw))
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_VALIDATION_TIMEOUT_SECS),
        };

        Ok(Self {
            provider,
            anthropic_api_key: lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()),
            gemini_api_key: lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()),
            validation_timeout,
        })
    }

    /// The API key for the selected provider.
    ///
    /// # Errors
    ///
    /// Fails with [`LlmError::ApiKeyNotFound`] when the selected
    /// provider has no key configured.
    pub fn api_key(&self) -> Result<&str, LlmError> {
        let key = match self.provider {
            Provider::Claude => self.anthropic_api_key.as_deref(),
            Provider::Gemini => self.gemini_api_key.as_deref(),
        };

        key.ok_or_else(|| LlmError::ApiKeyNotFound(self.provider.to_string()))
    }
}
