//! Generate-validate-retry engine for playsmith.
//!
//! Turns a natural-language deployment description into a validated
//! Ansible Kubernetes playbook. The engine drives the provider gateway
//! (`llm`) and the sandboxed checker (`validator`) in a bounded loop:
//! generate a candidate, validate it, and on failure fold the
//! validation errors back into the next attempt's prompt.
//!
//! All entry points are stateless; each call is independent and owns
//! its own attempt sequence.
//!
//! # Example
//!
//! ```rust,ignore
//! use engine::{generate_and_validate, Settings};
//! use std::time::Duration;
//!
//! let settings = Settings::from_env()?;
//! let outcome = generate_and_validate(
//!     "Deploy HA nginx with 3 replicas and a LoadBalancer",
//!     settings.provider,
//!     settings.api_key()?,
//!     2,
//!     0.3,
//!     settings.validation_timeout,
//! )
//! .await;
//!
//! if outcome.success {
//!     println!("{}", outcome.playbook_yaml);
//! }
//! ```

pub mod generate;
pub mod outcome;
pub mod prompts;
pub mod settings;

pub use generate::{generate_and_validate, generate_readme, run_generation_loop, validate_playbook};
pub use outcome::GenerationOutcome;
pub use prompts::load_system_prompt;
pub use settings::Settings;

/// Default attempt budget for a generation run.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// Default sampling temperature for playbook generation.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
