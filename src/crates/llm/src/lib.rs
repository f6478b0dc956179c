//! LLM provider gateway for playsmith.
//!
//! This crate provides a uniform interface over the text-generation
//! providers playsmith can drive. The provider set is closed: Anthropic
//! Claude and Google Gemini. Each provider implements the
//! [`TextGenerator`] trait, so everything above this crate is
//! provider-agnostic.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::{create_generator, GenerationRequest, Provider};
//!
//! let generator = create_generator(Provider::Claude, api_key)?;
//!
//! let request = GenerationRequest::new(system_prompt, "Deploy nginx with 2 replicas")
//!     .with_max_tokens(4096)
//!     .with_temperature(0.3);
//!
//! let response = generator.generate(request).await?;
//! println!("{}", response.content);
//! ```
//!
//! # Design
//!
//! This crate performs exactly one outbound call per `generate`
//! invocation. There is no retry logic here: retry policy belongs to
//! the engine crate, which owns the generate-validate loop. Transport
//! and authentication failures are surfaced as [`LlmError`] values and
//! propagated to the caller.

pub mod config;
pub mod error;
pub mod generator;
pub mod remote;
pub mod types;

pub use config::ProviderConfig;
pub use error::{LlmError, Result};
pub use generator::{create_generator, Provider, TextGenerator};
pub use remote::{ClaudeClient, GeminiClient};
pub use types::{GenerationRequest, GenerationResponse};
