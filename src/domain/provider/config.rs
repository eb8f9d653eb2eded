use std::fmt;

use super::ProviderKind;

/// Resolved connection settings for one provider, immutable per request
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub endpoint_url: String,
    pub auth_header_value: String,
    pub model: Option<String>,
}

impl ProviderConfig {
    /// Creates a config that authenticates with `Authorization: Bearer {token}`
    pub fn bearer(kind: ProviderKind, endpoint_url: impl Into<String>, token: &str) -> Self {
        Self {
            kind,
            endpoint_url: endpoint_url.into(),
            auth_header_value: format!("Bearer {}", token),
            model: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Authorization value with all but the last four token characters masked
    pub fn redacted_auth(&self) -> String {
        let (scheme, token) = self
            .auth_header_value
            .split_once(' ')
            .unwrap_or(("", self.auth_header_value.as_str()));

        let count = token.chars().count();
        let masked = if count <= 4 {
            "****".to_string()
        } else {
            let tail: String = token.chars().skip(count - 4).collect();
            format!("****{}", tail)
        };

        if scheme.is_empty() {
            masked
        } else {
            format!("{} {}", scheme, masked)
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("endpoint_url", &self.endpoint_url)
            .field("auth_header_value", &self.redacted_auth())
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        let config = ProviderConfig::bearer(ProviderKind::Vercel, "https://gw/v1", "vk-secret-1234");
        assert_eq!(config.auth_header_value, "Bearer vk-secret-1234");
        assert_eq!(config.name(), "vercel");
    }

    #[test]
    fn test_redacted_auth_keeps_tail() {
        let config = ProviderConfig::bearer(ProviderKind::Cloudflare, "https://x", "abcdefgh1234");
        assert_eq!(config.redacted_auth(), "Bearer ****1234");
    }

    #[test]
    fn test_redacted_auth_short_token() {
        let config = ProviderConfig::bearer(ProviderKind::Cloudflare, "https://x", "abc");
        assert_eq!(config.redacted_auth(), "Bearer ****");
    }

    #[test]
    fn test_debug_never_prints_token() {
        let config = ProviderConfig::bearer(ProviderKind::HuggingFace, "https://x", "hf_supersecret")
            .with_model("mistral");
        let debug = format!("{:?}", config);

        assert!(!debug.contains("hf_supersecret"));
        assert!(debug.contains("mistral"));
    }
}
