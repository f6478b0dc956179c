//! Sandboxed Ansible playbook validation for playsmith.
//!
//! A candidate playbook is checked in two independent phases:
//! `ansible-lint` and `ansible-playbook --syntax-check`, both executed
//! inside an isolated Docker container. A failure in either phase makes
//! the result invalid; each phase's raw output is preserved separately
//! for diagnostics.
//!
//! The checker boundary is total: timeouts and execution faults are
//! folded into a failed [`ValidationResult`] instead of being raised,
//! so callers always have a well-formed verdict to act on.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use validator::{DockerValidator, PlaybookChecker};
//!
//! let checker = DockerValidator::new(Duration::from_secs(30));
//! let result = checker.validate(playbook_yaml).await;
//! if !result.is_valid {
//!     eprintln!("{}", result.errors.join("\n"));
//! }
//! ```

pub mod docker;
pub mod result;

pub use docker::DockerValidator;
pub use result::ValidationResult;

use async_trait::async_trait;

/// Capability for validating a candidate playbook.
///
/// The method is infallible by contract: any fault in the underlying
/// checker must be converted into a failed [`ValidationResult`]. This
/// keeps the retry loop free of checker-specific error handling and
/// makes it trivial to substitute a stub in tests.
#[async_trait]
pub trait PlaybookChecker: Send + Sync {
    /// Validate the playbook text and return a verdict.
    async fn validate(&self, playbook_yaml: &str) -> ValidationResult;
}
