//! Validation verdict value type.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of playbook validation.
///
/// Invariant: `is_valid` is true exactly when `errors` is empty.
/// Warnings never affect validity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the playbook passed all validation checks.
    pub is_valid: bool,

    /// Raw stdout from the lint phase.
    pub lint_output: String,

    /// Raw stdout from the syntax-check phase.
    pub syntax_check_output: String,

    /// Error messages, one per failed check.
    pub errors: Vec<String>,

    /// Warning messages. May be non-empty on a passing result.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Assemble a result from phase outputs, deriving validity from the
    /// collected errors.
    pub fn new(
        lint_output: String,
        syntax_check_output: String,
        errors: Vec<String>,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            is_valid: errors.is_empty(),
            lint_output,
            syntax_check_output,
            errors,
            warnings,
        }
    }

    /// A failed result for a validation run that exceeded its deadline.
    pub fn timed_out(timeout: Duration) -> Self {
        Self::new(
            String::new(),
            String::new(),
            vec![format!(
                "Validation timeout after {} seconds",
                timeout.as_secs()
            )],
            Vec::new(),
        )
    }

    /// A failed result for an unexpected execution fault, classified by
    /// kind with the detail truncated.
    pub fn execution_fault(kind: &str, detail: &str) -> Self {
        let mut detail = detail.to_string();
        if detail.len() > 500 {
            let mut end = 500;
            while !detail.is_char_boundary(end) {
                end -= 1;
            }
            detail.truncate(end);
        }
        Self::new(
            String::new(),
            String::new(),
            vec![format!("Validation error: {}: {}", kind, detail)],
            Vec::new(),
        )
    }
}
