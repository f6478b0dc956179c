//! System prompt management.
//!
//! The system prompt ships embedded in the binary. It is checked for a
//! small set of critical enforcement keywords so that an accidental
//! edit which drops one of the hard generation rules fails loudly
//! instead of silently producing worse playbooks.

use thiserror::Error;

const SYSTEM_PROMPT: &str = include_str!("prompts/ansible_k8s_expert.txt");

/// Keywords the prompt must contain for the validator feedback loop to
/// stay aligned with the generation rules.
const CRITICAL_KEYWORDS: [&str; 4] = [
    "kubernetes.core.k8s",
    "NEVER use kubectl",
    "FQCN",
    "state: present",
];

/// The embedded system prompt failed its keyword check.
#[derive(Debug, Error)]
#[error("system prompt missing critical keywords: {missing:?}")]
pub struct PromptError {
    pub missing: Vec<&'static str>,
}

/// Load the Ansible K8s expert system prompt.
pub fn load_system_prompt() -> Result<&'static str, PromptError> {
    let missing: Vec<&'static str> = CRITICAL_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| !SYSTEM_PROMPT.contains(kw))
        .collect();

    if !missing.is_empty() {
        return Err(PromptError { missing });
    }

    Ok(SYSTEM_PROMPT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_prompt_passes_keyword_check() {
        let prompt = load_system_prompt().unwrap();
        for kw in CRITICAL_KEYWORDS {
            assert!(prompt.contains(kw), "prompt missing keyword: {kw}");
        }
    }

    #[test]
    fn test_prompt_is_nonempty() {
        assert!(load_system_prompt().unwrap().len() > 100);
    }
}
