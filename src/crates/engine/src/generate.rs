//! The generate-validate-retry loop and the public entry points.
//!
//! One run is strictly sequential: each attempt's generation and
//! validation complete before the next attempt begins, because attempt
//! n+1's prompt is rebuilt from attempt n's validation errors. Runs
//! share no state; every call starts fresh from the caller's arguments.

use crate::outcome::GenerationOutcome;
use crate::prompts::load_system_prompt;
use llm::{create_generator, GenerationRequest, Provider, TextGenerator};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use validator::{DockerValidator, PlaybookChecker, ValidationResult};

/// Corrective reminders appended to the rebuilt description after a
/// failed attempt, restating the constraints the validator enforces.
const RETRY_REMINDERS: &str = "Please fix these issues and ensure:\n\
    - All modules use FQCN (kubernetes.core.k8s not k8s)\n\
    - No kubectl commands are used\n\
    - YAML syntax is correct\n\
    - All required fields are present";

const PLAYBOOK_MAX_TOKENS: u32 = 4096;

/// Generate and validate an Ansible Kubernetes playbook.
///
/// Wires the real provider gateway and Docker checker, then drives
/// [`run_generation_loop`]. `max_attempts` bounds total generation
/// calls strictly: `max_attempts = 1` performs one generation with no
/// retry. A zero budget is a configuration error reported before any
/// attempt.
///
/// This function never returns an error: every fault is folded into
/// the returned [`GenerationOutcome`].
pub async fn generate_and_validate(
    description: &str,
    provider: Provider,
    api_key: &str,
    max_attempts: u32,
    temperature: f32,
    validation_timeout: Duration,
) -> GenerationOutcome {
    let generator = match create_generator(provider, api_key) {
        Ok(generator) => generator,
        Err(e) => {
            warn!(error = %e, "generator setup failed");
            return GenerationOutcome::fault(format!("Generation error: {}", e));
        }
    };

    let checker = Arc::new(DockerValidator::new(validation_timeout));

    run_generation_loop(description, generator, checker, max_attempts, temperature).await
}

/// Drive the retry loop with injected generator and checker.
///
/// Exposed so callers (and tests) can substitute either collaborator.
pub async fn run_generation_loop(
    description: &str,
    generator: Arc<dyn TextGenerator>,
    checker: Arc<dyn PlaybookChecker>,
    max_attempts: u32,
    temperature: f32,
) -> GenerationOutcome {
    if max_attempts == 0 {
        return GenerationOutcome::fault(
            "Generation error: invalid retry budget (max_attempts must be at least 1)",
        );
    }

    let system_prompt = match load_system_prompt() {
        Ok(prompt) => prompt,
        Err(e) => return GenerationOutcome::fault(format!("Generation error: {}", e)),
    };

    let mut current_description = description.to_string();

    for attempt in 1..=max_attempts {
        debug!(attempt, max_attempts, "starting generation attempt");

        let request = GenerationRequest::new(system_prompt, &current_description)
            .with_max_tokens(PLAYBOOK_MAX_TOKENS)
            .with_temperature(temperature);

        let response = match generator.generate(request).await {
            Ok(response) => response,
            Err(e) => {
                // A transport or auth fault is not a bad candidate;
                // retrying against a dead endpoint wastes the budget.
                warn!(attempt, error = %e, "generation failed, aborting run");
                return GenerationOutcome::fault(format!("Generation error: {}", e));
            }
        };

        let playbook_yaml = response.content;
        let validation = checker.validate(&playbook_yaml).await;

        if validation.is_valid {
            info!(attempt, model = %response.model, "playbook accepted");
            return GenerationOutcome::accepted(
                playbook_yaml,
                validation,
                response.model,
                response.usage_tokens,
            );
        }

        debug!(
            attempt,
            errors = validation.errors.len(),
            "validation rejected candidate"
        );

        if attempt == max_attempts {
            info!(attempts = max_attempts, "attempt budget exhausted");
            return GenerationOutcome::exhausted(playbook_yaml, validation, max_attempts);
        }

        current_description = build_retry_description(description, &validation);
    }

    // The loop always returns from its final iteration.
    unreachable!("generation loop exited without an outcome")
}

/// Rebuild the working description for the next attempt: the original
/// description, the failed attempt's error list, then the fixed
/// corrective reminders. This feedback injection is what lets the
/// generator self-correct.
fn build_retry_description(description: &str, validation: &ValidationResult) -> String {
    format!(
        "{}\n\nPrevious attempt had validation errors:\n{}\n\n{}",
        description,
        validation.errors.join("\n"),
        RETRY_REMINDERS
    )
}

/// Validate a playbook without generating one.
pub async fn validate_playbook(
    playbook_yaml: &str,
    validation_timeout: Duration,
) -> ValidationResult {
    DockerValidator::new(validation_timeout)
        .validate(playbook_yaml)
        .await
}

/// Generate README documentation for a playbook. Single shot, no retry.
///
/// Generation failure is folded into a fallback markdown document so
/// the caller always has something to show next to the playbook.
pub async fn generate_readme(playbook_yaml: &str, provider: Provider, api_key: &str) -> String {
    match try_generate_readme(playbook_yaml, provider, api_key).await {
        Ok(readme) => readme,
        Err(e) => {
            warn!(error = %e, "README generation failed");
            format!("# README Generation Failed\n\nError: {}", e)
        }
    }
}

async fn try_generate_readme(
    playbook_yaml: &str,
    provider: Provider,
    api_key: &str,
) -> llm::Result<String> {
    let generator = create_generator(provider, api_key)?;

    let readme_prompt = format!(
        "Generate a comprehensive README.md in markdown format for this Ansible Kubernetes playbook.\n\n\
         Include:\n\
         1. **Overview**: What this playbook deploys\n\
         2. **Prerequisites**: Required tools, access, and dependencies\n\
         3. **Usage**: Step-by-step commands to run the playbook\n\
         4. **What Gets Created**: Detailed list of Kubernetes resources\n\
         5. **Customization**: How to modify for different environments\n\
         6. **Troubleshooting**: Common issues and solutions\n\n\
         Be clear, professional, and provide actionable instructions.\n\n\
         Playbook:\n```yaml\n{}\n```\n",
        playbook_yaml
    );

    let request = GenerationRequest::new(
        "You are a technical writer. Generate clear, professional documentation in markdown format.",
        readme_prompt,
    )
    .with_max_tokens(2048)
    .with_temperature(0.5);

    let response = generator.generate(request).await?;
    Ok(response.content)
}
