//! Remote provider implementations.
//!
//! - **Claude** - Anthropic's Messages API
//! - **Gemini** - Google's Generative Language API

mod claude;
mod gemini;

pub use claude::ClaudeClient;
pub use gemini::GeminiClient;

use crate::error::LlmError;
use reqwest::StatusCode;

/// Map a non-success provider status onto the gateway error taxonomy.
///
/// Both 401 and 403 are authentication faults: providers use either
/// for rejected or under-privileged credentials.
fn classify_api_error(provider: &str, status: StatusCode, error_text: String) -> LlmError {
    match status.as_u16() {
        401 | 403 => LlmError::Authentication(error_text),
        429 => LlmError::RateLimited(error_text),
        _ => LlmError::Provider(format!("{} API error {}: {}", provider, status, error_text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_auth_statuses_classified_as_authentication() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let err = classify_api_error("Claude", status, "denied".into());
            assert!(
                matches!(err, LlmError::Authentication(_)),
                "status {} should be an auth error",
                status
            );
            assert!(err.is_auth_error());
        }
    }

    #[test]
    fn test_rate_limit_classified() {
        let err = classify_api_error("Gemini", StatusCode::TOO_MANY_REQUESTS, "slow down".into());
        assert!(matches!(err, LlmError::RateLimited(_)));
    }

    #[test]
    fn test_other_statuses_name_the_provider() {
        let err = classify_api_error("Claude", StatusCode::INTERNAL_SERVER_ERROR, "boom".into());
        match err {
            LlmError::Provider(msg) => {
                assert!(msg.contains("Claude API error 500"));
                assert!(msg.contains("boom"));
            }
            other => panic!("expected provider error, got {:?}", other),
        }
    }
}
