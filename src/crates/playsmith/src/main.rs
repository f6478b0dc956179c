//! # playsmith
//!
//! CLI front end for the playbook generation engine. Generates
//! validated Ansible Kubernetes playbooks from natural-language
//! descriptions, and validates existing playbooks in the Docker
//! sandbox.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use engine::{Settings, DEFAULT_MAX_ATTEMPTS, DEFAULT_TEMPERATURE};
use llm::Provider;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use validator::ValidationResult;

#[derive(Parser)]
#[command(name = "playsmith")]
#[command(about = "Generate validated Ansible Kubernetes playbooks from natural language", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a validated playbook from a deployment description
    Generate {
        /// Natural language description of the desired deployment
        description: String,

        /// Provider to use (claude or gemini); overrides LLM_PROVIDER
        #[arg(short, long)]
        provider: Option<String>,

        /// Maximum generate-validate attempts
        #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
        max_attempts: u32,

        /// Sampling temperature (0.0-1.0)
        #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
        temperature: f32,

        /// Validation timeout in seconds; overrides VALIDATION_TIMEOUT_SECS
        #[arg(long)]
        timeout: Option<u64>,

        /// Write the playbook to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also generate README documentation for the playbook
        #[arg(long)]
        readme: bool,
    },

    /// Validate an existing playbook file in the sandbox
    Validate {
        /// Path to the playbook YAML file
        file: PathBuf,

        /// Validation timeout in seconds; overrides VALIDATION_TIMEOUT_SECS
        #[arg(long)]
        timeout: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env().context("failed to load settings")?;

    match cli.command {
        Commands::Generate {
            description,
            provider,
            max_attempts,
            temperature,
            timeout,
            output,
            readme,
        } => {
            let provider = resolve_provider(provider, &settings)?;
            let api_key = settings.api_key().context("no API key configured")?;
            let validation_timeout = timeout
                .map(Duration::from_secs)
                .unwrap_or(settings.validation_timeout);

            let outcome = engine::generate_and_validate(
                &description,
                provider,
                api_key,
                max_attempts,
                temperature,
                validation_timeout,
            )
            .await;

            if !outcome.success {
                if !outcome.playbook_yaml.is_empty() {
                    eprintln!("--- last candidate ---\n{}", outcome.playbook_yaml);
                }
                if let Some(validation) = &outcome.validation_result {
                    eprintln!("{}", format_validation(validation));
                }
                bail!(
                    "{}",
                    outcome
                        .error_message
                        .unwrap_or_else(|| "generation failed".to_string())
                );
            }

            match &output {
                Some(path) => {
                    std::fs::write(path, &outcome.playbook_yaml)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Playbook written to {}", path.display());
                }
                None => println!("{}", outcome.playbook_yaml),
            }

            if let Some(model) = &outcome.model_used {
                eprintln!(
                    "Generated by {} ({} tokens)",
                    model,
                    outcome
                        .tokens_used
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| "unreported".to_string())
                );
            }

            if readme {
                let readme_md =
                    engine::generate_readme(&outcome.playbook_yaml, provider, api_key).await;
                match &output {
                    Some(path) => {
                        let readme_path = path.with_extension("md");
                        std::fs::write(&readme_path, readme_md).with_context(|| {
                            format!("failed to write {}", readme_path.display())
                        })?;
                        eprintln!("README written to {}", readme_path.display());
                    }
                    None => println!("\n{}", readme_md),
                }
            }
        }

        Commands::Validate { file, timeout } => {
            let playbook_yaml = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let validation_timeout = timeout
                .map(Duration::from_secs)
                .unwrap_or(settings.validation_timeout);

            let validation = engine::validate_playbook(&playbook_yaml, validation_timeout).await;
            println!("{}", format_validation(&validation));

            if !validation.is_valid {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn resolve_provider(override_name: Option<String>, settings: &Settings) -> Result<Provider> {
    match override_name {
        Some(name) => Ok(name.parse::<Provider>()?),
        None => Ok(settings.provider),
    }
}

/// Render a validation verdict for the terminal.
fn format_validation(validation: &ValidationResult) -> String {
    let mut out = String::new();

    if validation.is_valid {
        out.push_str("Playbook is valid.\n\n");
        out.push_str("=== Ansible Lint Output ===\n");
        out.push_str(if validation.lint_output.is_empty() {
            "(no output)"
        } else {
            &validation.lint_output
        });
        out.push_str("\n\n=== Syntax Check Output ===\n");
        out.push_str(if validation.syntax_check_output.is_empty() {
            "(no output)"
        } else {
            &validation.syntax_check_output
        });
    } else {
        out.push_str("Playbook validation failed.\n\n=== Errors ===\n");
        out.push_str(&validation.errors.join("\n\n"));
    }

    if !validation.warnings.is_empty() {
        out.push_str("\n\nWarnings:\n");
        out.push_str(&validation.warnings.join("\n"));
    }

    out
}
