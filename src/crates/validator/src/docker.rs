//! Docker-backed playbook checker.
//!
//! Each phase runs `docker run --rm -i` against a fixed validator
//! image and feeds the candidate playbook over stdin. Piping through
//! stdin avoids volume-mount issues when the caller itself runs inside
//! a container and cannot share temp files with the sandbox.

use crate::result::ValidationResult;
use crate::PlaybookChecker;
use async_trait::async_trait;
use std::io;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

const DEFAULT_IMAGE: &str = "playsmith-validator:latest";

const LINT_CMD: &str = "cat > /tmp/playbook.yml && ansible-lint /tmp/playbook.yml";
const SYNTAX_CMD: &str =
    "cat > /tmp/playbook.yml && ansible-playbook --syntax-check /tmp/playbook.yml";

/// Validates Ansible playbooks inside a Docker sandbox.
#[derive(Debug, Clone)]
pub struct DockerValidator {
    image: String,
    timeout: Duration,
}

impl DockerValidator {
    /// Create a validator with the default sandbox image.
    pub fn new(timeout: Duration) -> Self {
        Self {
            image: DEFAULT_IMAGE.to_string(),
            timeout,
        }
    }

    /// Override the sandbox image.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Build the `docker run` invocation for one check phase.
    fn sandbox_command(&self, shell_cmd: &str) -> Command {
        let mut command = Command::new("docker");
        command
            .args(["run", "--rm", "-i", &self.image, "sh", "-c", shell_cmd])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }

    /// Run one check with the configured deadline, mapping timeouts and
    /// spawn faults into failed results.
    async fn run_check_bounded(
        &self,
        shell_cmd: &str,
        playbook_yaml: &str,
    ) -> Result<CheckOutput, ValidationResult> {
        match run_with_deadline(self.sandbox_command(shell_cmd), playbook_yaml, self.timeout).await
        {
            Err(RunError::TimedOut) => {
                warn!(timeout_secs = self.timeout.as_secs(), "validation timed out");
                Err(ValidationResult::timed_out(self.timeout))
            }
            Err(RunError::Io(e)) => {
                warn!(error = %e, "validation sandbox fault");
                Err(ValidationResult::execution_fault(
                    fault_kind(&e),
                    &e.to_string(),
                ))
            }
            Ok(output) => Ok(output),
        }
    }
}

/// Why a bounded run produced no output.
#[derive(Debug)]
enum RunError {
    TimedOut,
    Io(io::Error),
}

/// Spawn the command, feed `stdin_data`, and wait for its output, all
/// within `deadline`. The child never outlives the deadline: it is
/// spawned with `kill_on_drop`, so abandoning the wait on expiry kills
/// the process instead of leaving it detached.
async fn run_with_deadline(
    mut command: Command,
    stdin_data: &str,
    deadline: Duration,
) -> Result<CheckOutput, RunError> {
    command.kill_on_drop(true);

    let mut child = command.spawn().map_err(RunError::Io)?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| RunError::Io(io::Error::other("failed to open sandbox stdin")))?;

    let feed_and_wait = async {
        stdin.write_all(stdin_data.as_bytes()).await?;
        drop(stdin);
        child.wait_with_output().await
    };

    match tokio::time::timeout(deadline, feed_and_wait).await {
        Err(_) => Err(RunError::TimedOut),
        Ok(Err(e)) => Err(RunError::Io(e)),
        Ok(Ok(output)) => Ok(CheckOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }),
    }
}

#[async_trait]
impl PlaybookChecker for DockerValidator {
    async fn validate(&self, playbook_yaml: &str) -> ValidationResult {
        let lint = match self.run_check_bounded(LINT_CMD, playbook_yaml).await {
            Ok(output) => output,
            Err(result) => return result,
        };

        let syntax = match self.run_check_bounded(SYNTAX_CMD, playbook_yaml).await {
            Ok(output) => output,
            Err(result) => return result,
        };

        let result = assemble_result(&lint, &syntax);
        debug!(
            is_valid = result.is_valid,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "validation finished"
        );
        result
    }
}

/// Captured output of one check phase.
#[derive(Debug)]
struct CheckOutput {
    success: bool,
    exit_code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl CheckOutput {
    /// Best error text for a failed check: stderr, falling back to
    /// stdout, falling back to the exit status.
    fn error_text(&self) -> String {
        let text = self.stderr.trim();
        if !text.is_empty() {
            return text.to_string();
        }
        let text = self.stdout.trim();
        if !text.is_empty() {
            return text.to_string();
        }
        match self.exit_code {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Combine the two phase outputs into a verdict.
fn assemble_result(lint: &CheckOutput, syntax: &CheckOutput) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if !lint.success {
        errors.push(format!("ansible-lint failed:\n{}", lint.error_text()));
    }

    if !syntax.success {
        errors.push(format!("Syntax check failed:\n{}", syntax.error_text()));
    }

    if lint.stdout.to_lowercase().contains("warning") {
        warnings.push(lint.stdout.clone());
    }

    ValidationResult::new(lint.stdout.clone(), syntax.stdout.clone(), errors, warnings)
}

fn fault_kind(e: &io::Error) -> &'static str {
    match e.kind() {
        io::ErrorKind::NotFound => "docker not available",
        io::ErrorKind::PermissionDenied => "permission denied",
        io::ErrorKind::BrokenPipe => "sandbox closed stdin",
        _ => "io error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passing(stdout: &str) -> CheckOutput {
        CheckOutput {
            success: true,
            exit_code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    fn failing(stdout: &str, stderr: &str) -> CheckOutput {
        CheckOutput {
            success: false,
            exit_code: Some(2),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn test_both_phases_pass() {
        let result = assemble_result(&passing("Passed"), &passing("playbook: ok"));
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert_eq!(result.lint_output, "Passed");
        assert_eq!(result.syntax_check_output, "playbook: ok");
    }

    #[test]
    fn test_lint_failure_makes_result_invalid() {
        let result = assemble_result(
            &failing("", "fqcn[action-core]: use kubernetes.core.k8s"),
            &passing("ok"),
        );
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("ansible-lint failed:"));
        assert!(result.errors[0].contains("fqcn[action-core]"));
    }

    #[test]
    fn test_syntax_failure_makes_result_invalid() {
        let result = assemble_result(
            &passing("ok"),
            &failing("ERROR! Syntax Error while loading YAML", ""),
        );
        assert!(!result.is_valid);
        assert!(result.errors[0].starts_with("Syntax check failed:"));
    }

    #[test]
    fn test_both_phases_fail_reported_separately() {
        let result = assemble_result(&failing("", "lint bad"), &failing("", "syntax bad"));
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors[0].contains("lint bad"));
        assert!(result.errors[1].contains("syntax bad"));
    }

    #[test]
    fn test_failure_with_no_output_still_errors() {
        let result = assemble_result(&failing("", ""), &passing("ok"));
        assert!(!result.is_valid);
        assert!(result.errors[0].contains("exited with status 2"));
    }

    #[test]
    fn test_lint_warnings_collected_on_pass() {
        let result = assemble_result(&passing("WARNING: risky-shell-pipe"), &passing("ok"));
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("risky-shell-pipe"));
    }

    fn shell_command(script: &str) -> Command {
        let mut command = Command::new("sh");
        command
            .args(["-c", script])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_deadline_run_captures_output() {
        let output = run_with_deadline(
            shell_command("cat > /dev/null && echo checked"),
            "---\n- hosts: localhost\n",
            Duration::from_secs(5),
        )
        .await
        .unwrap();

        assert!(output.success);
        assert_eq!(output.stdout.trim(), "checked");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stalled_child_does_not_outlive_deadline() {
        let marker = std::env::temp_dir().join(format!(
            "playsmith-validator-stall-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&marker);

        let result = run_with_deadline(
            shell_command(&format!("sleep 2 && touch {}", marker.display())),
            "",
            Duration::from_millis(100),
        )
        .await;

        assert!(matches!(result, Err(RunError::TimedOut)));

        // Were the child still alive, it would create the marker after
        // its sleep; the kill at the deadline must prevent that.
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(!marker.exists());
        let _ = std::fs::remove_file(&marker);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_missing_binary_is_an_io_fault() {
        let mut command = Command::new("playsmith-no-such-binary");
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let result = run_with_deadline(command, "", Duration::from_secs(1)).await;
        match result {
            Err(RunError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("expected io fault, got {:?}", other),
        }
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let a = assemble_result(&failing("out", "err"), &passing("ok"));
        let b = assemble_result(&failing("out", "err"), &passing("ok"));
        assert_eq!(a.is_valid, b.is_valid);
        assert_eq!(a.errors, b.errors);
        assert_eq!(a.warnings, b.warnings);
    }
}
