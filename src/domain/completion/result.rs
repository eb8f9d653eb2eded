use serde::{Deserialize, Serialize};

/// Longest provider error message surfaced to callers, in characters
pub const MAX_ERROR_MESSAGE_CHARS: usize = 280;

/// Status recorded when a failure carries no upstream HTTP status
pub const DEFAULT_ERROR_STATUS: u16 = 500;

/// A single failed provider attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderError {
    pub provider: String,
    pub message: String,
    pub status_code: u16,
}

impl ProviderError {
    /// Creates an error, truncating the message to [`MAX_ERROR_MESSAGE_CHARS`]
    pub fn new(provider: impl Into<String>, message: impl AsRef<str>, status_code: u16) -> Self {
        Self {
            provider: provider.into(),
            message: truncate_message(message.as_ref(), MAX_ERROR_MESSAGE_CHARS),
            status_code,
        }
    }

    /// Non-2xx upstream response; keeps only an excerpt of the body
    pub fn http(provider: impl Into<String>, status: u16, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            format!("HTTP {}: {}", status, body)
        };

        Self::new(provider, message, status)
    }

    /// Failure with no HTTP status: transport errors, timeouts, unusable bodies
    pub fn unclassified(provider: impl Into<String>, message: impl AsRef<str>) -> Self {
        Self::new(provider, message, DEFAULT_ERROR_STATUS)
    }

    /// 2xx response that yielded no usable text
    pub fn empty_response(provider: impl Into<String>) -> Self {
        Self::unclassified(provider, "empty response")
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.provider, self.status_code, self.message)
    }
}

impl std::error::Error for ProviderError {}

/// Successful outcome of a fallback chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResult {
    pub text: String,
    pub provider_used: String,
    pub attempted_providers: Vec<String>,
    /// Failures of the providers tried before `provider_used`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provider_errors: Vec<ProviderError>,
}

/// Truncates on a char boundary to at most `max_chars` characters.
///
/// The ellipsis marking the cut counts toward the limit.
pub fn truncate_message(message: &str, max_chars: usize) -> String {
    if message.chars().count() <= max_chars {
        return message.to_string();
    }

    let kept: String = message.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_message_untouched() {
        assert_eq!(truncate_message("hello", 10), "hello");
        assert_eq!(truncate_message("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn test_truncate_long_message() {
        let truncated = truncate_message("hello world", 5);
        assert_eq!(truncated, "hell…");
        assert_eq!(truncated.chars().count(), 5);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let truncated = truncate_message("ééééé", 3);
        assert_eq!(truncated, "éé…");
    }

    #[test]
    fn test_http_error_caps_body() {
        let body = "x".repeat(1_000);
        let error = ProviderError::http("cloudflare", 500, &body);

        assert_eq!(error.status_code, 500);
        assert!(error.message.starts_with("HTTP 500: xxx"));
        assert_eq!(error.message.chars().count(), MAX_ERROR_MESSAGE_CHARS);
        assert!(error.message.ends_with('…'));
    }

    #[test]
    fn test_http_error_without_body() {
        let error = ProviderError::http("huggingface", 503, "  ");
        assert_eq!(error.message, "HTTP 503");
    }

    #[test]
    fn test_empty_response_defaults_status() {
        let error = ProviderError::empty_response("vercel");
        assert_eq!(error.status_code, DEFAULT_ERROR_STATUS);
        assert_eq!(error.message, "empty response");
    }

    #[test]
    fn test_provider_error_serializes_camel_case() {
        let error = ProviderError::new("cloudflare", "boom", 502);
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"provider": "cloudflare", "message": "boom", "statusCode": 502})
        );
    }
}
