use thiserror::Error;

use super::completion::ProviderError;

const NONE_ATTEMPTED: &[String] = &[];

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Unsupported provider: {name}")]
    UnsupportedProvider { name: String },

    #[error("No AI providers are configured")]
    NoProvidersConfigured,

    #[error("All providers failed ({} attempted)", attempted.len())]
    ProvidersExhausted {
        attempted: Vec<String>,
        errors: Vec<ProviderError>,
        status: u16,
    },

    #[error("Endpoint retired: {message}")]
    Retired { message: String, notice: String },

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn unsupported_provider(name: impl Into<String>) -> Self {
        Self::UnsupportedProvider { name: name.into() }
    }

    pub fn exhausted(attempted: Vec<String>, errors: Vec<ProviderError>) -> Self {
        let status = errors.last().map_or(500, |e| e.status_code);

        Self::ProvidersExhausted {
            attempted,
            errors,
            status,
        }
    }

    pub fn retired(message: impl Into<String>, notice: impl Into<String>) -> Self {
        Self::Retired {
            message: message.into(),
            notice: notice.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Providers that were contacted before this error was produced.
    ///
    /// Errors raised before any network call report an empty list.
    pub fn attempted_providers(&self) -> Option<&[String]> {
        match self {
            Self::ProvidersExhausted { attempted, .. } => Some(attempted.as_slice()),
            Self::NoProvidersConfigured | Self::Configuration { .. } => Some(NONE_ATTEMPTED),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Invalid input");
        assert_eq!(error.to_string(), "Validation error: Invalid input");
    }

    #[test]
    fn test_unsupported_provider_error() {
        let error = DomainError::unsupported_provider("openrouter");
        assert_eq!(error.to_string(), "Unsupported provider: openrouter");
        assert!(error.attempted_providers().is_none());
    }

    #[test]
    fn test_exhausted_takes_last_status() {
        let error = DomainError::exhausted(
            vec!["cloudflare".to_string(), "huggingface".to_string()],
            vec![
                ProviderError::new("cloudflare", "HTTP 401", 401),
                ProviderError::new("huggingface", "HTTP 503", 503),
            ],
        );

        match &error {
            DomainError::ProvidersExhausted { status, .. } => assert_eq!(*status, 503),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(error.to_string(), "All providers failed (2 attempted)");
        assert_eq!(error.attempted_providers().map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_exhausted_without_errors_defaults_to_500() {
        let error = DomainError::exhausted(vec![], vec![]);

        match error {
            DomainError::ProvidersExhausted { status, .. } => assert_eq!(status, 500),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_no_providers_reports_empty_attempts() {
        let error = DomainError::NoProvidersConfigured;
        assert_eq!(error.attempted_providers().map(<[String]>::is_empty), Some(true));
    }
}
