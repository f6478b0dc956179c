//! Orchestration outcome value type.

use serde::{Deserialize, Serialize};
use validator::ValidationResult;

/// Result of one generate-validate run.
///
/// Constructed once per call and returned as a closed value: the entry
/// points never raise past their own boundary, so callers can always
/// render an outcome without their own fault-handling layer.
///
/// On failure `playbook_yaml` still carries the last generated
/// candidate (when one exists) so a human can inspect how close the
/// attempt came.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// Whether generation produced a validated playbook.
    pub success: bool,

    /// Generated YAML content. Last candidate even on failure; empty
    /// only when generation itself never produced text.
    pub playbook_yaml: String,

    /// Validation details of the final attempt, when validation ran.
    pub validation_result: Option<ValidationResult>,

    /// Human-readable error summary when the run failed.
    pub error_message: Option<String>,

    /// Model identifier that produced the accepted playbook.
    pub model_used: Option<String>,

    /// Token usage of the accepted generation, when reported.
    pub tokens_used: Option<u32>,
}

impl GenerationOutcome {
    /// A validated playbook, accepted by the checker.
    pub fn accepted(
        playbook_yaml: String,
        validation: ValidationResult,
        model: String,
        tokens: Option<u32>,
    ) -> Self {
        Self {
            success: true,
            playbook_yaml,
            validation_result: Some(validation),
            error_message: None,
            model_used: Some(model),
            tokens_used: tokens,
        }
    }

    /// The attempt budget ran out; the last candidate and its verdict
    /// are preserved for inspection.
    pub fn exhausted(playbook_yaml: String, validation: ValidationResult, attempts: u32) -> Self {
        Self {
            success: false,
            playbook_yaml,
            validation_result: Some(validation),
            error_message: Some(format!(
                "Failed to generate valid playbook after {} attempts",
                attempts
            )),
            model_used: None,
            tokens_used: None,
        }
    }

    /// A fault below the loop (gateway or configuration) terminated the
    /// run before a candidate could be validated.
    pub fn fault(message: impl Into<String>) -> Self {
        Self {
            success: false,
            playbook_yaml: String::new(),
            validation_result: None,
            error_message: Some(message.into()),
            model_used: None,
            tokens_used: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_outcome() {
        let validation = ValidationResult::new("ok".into(), "ok".into(), vec![], vec![]);
        let outcome =
            GenerationOutcome::accepted("---\n".into(), validation, "model-x".into(), Some(10));

        assert!(outcome.success);
        assert_eq!(outcome.model_used.as_deref(), Some("model-x"));
        assert_eq!(outcome.tokens_used, Some(10));
        assert!(outcome.error_message.is_none());
    }

    #[test]
    fn test_exhausted_outcome_keeps_candidate() {
        let validation =
            ValidationResult::new(String::new(), String::new(), vec!["bad".into()], vec![]);
        let outcome = GenerationOutcome::exhausted("last candidate".into(), validation, 2);

        assert!(!outcome.success);
        assert_eq!(outcome.playbook_yaml, "last candidate");
        assert!(outcome.error_message.unwrap().contains("2 attempts"));
    }

    #[test]
    fn test_fault_outcome_has_no_candidate() {
        let outcome = GenerationOutcome::fault("Generation error: boom");
        assert!(!outcome.success);
        assert!(outcome.playbook_yaml.is_empty());
        assert!(outcome.validation_result.is_none());
    }
}
