//! Sequential fallback across an ordered provider chain

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use super::{CompletionProvider, CompletionRequest, CompletionResult, ProviderError};
use crate::domain::DomainError;

/// Tries each provider in order until one returns non-blank text.
///
/// Attempts are strictly sequential. A blank completion counts as a
/// failure so it feeds the next provider instead of short-circuiting.
pub async fn complete_with_fallback(
    providers: &[Arc<dyn CompletionProvider>],
    request: &CompletionRequest,
) -> Result<CompletionResult, DomainError> {
    if providers.is_empty() {
        return Err(DomainError::NoProvidersConfigured);
    }

    let mut attempted = Vec::with_capacity(providers.len());
    let mut errors = Vec::new();

    for provider in providers {
        let name = provider.name().to_string();
        attempted.push(name.clone());

        let start = Instant::now();
        let outcome = provider.complete(request).await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(text) if !text.trim().is_empty() => {
                info!(provider = %name, latency_ms, attempt = attempted.len(), "Provider completed");

                return Ok(CompletionResult {
                    text,
                    provider_used: name,
                    attempted_providers: attempted,
                    provider_errors: errors,
                });
            }
            Ok(_) => {
                warn!(provider = %name, latency_ms, "Provider returned an empty completion");
                errors.push(ProviderError::empty_response(name));
            }
            Err(error) => {
                warn!(
                    provider = %name,
                    status = error.status_code,
                    latency_ms,
                    error = %error.message,
                    "Provider attempt failed"
                );
                errors.push(error);
            }
        }
    }

    Err(DomainError::exhausted(attempted, errors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::completion::provider::mock::ScriptedProvider;

    fn request() -> CompletionRequest {
        CompletionRequest::builder().user("ping").build()
    }

    fn chain(providers: &[&Arc<ScriptedProvider>]) -> Vec<Arc<dyn CompletionProvider>> {
        providers
            .iter()
            .map(|p| Arc::clone(*p) as Arc<dyn CompletionProvider>)
            .collect()
    }

    #[tokio::test]
    async fn test_empty_chain_fails_without_attempts() {
        let result = complete_with_fallback(&[], &request()).await;
        assert!(matches!(result, Err(DomainError::NoProvidersConfigured)));
    }

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let first = Arc::new(ScriptedProvider::succeeding("cloudflare", "pong"));
        let second = Arc::new(ScriptedProvider::succeeding("huggingface", "unused"));

        let result = complete_with_fallback(&chain(&[&first, &second]), &request())
            .await
            .unwrap();

        assert_eq!(result.text, "pong");
        assert_eq!(result.provider_used, "cloudflare");
        assert_eq!(result.attempted_providers, vec!["cloudflare"]);
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 0);
    }

    #[tokio::test]
    async fn test_falls_back_after_failure() {
        let first = Arc::new(ScriptedProvider::failing("cloudflare", 500, "HTTP 500"));
        let second = Arc::new(ScriptedProvider::succeeding("huggingface", "fallback ok"));

        let result = complete_with_fallback(&chain(&[&first, &second]), &request())
            .await
            .unwrap();

        assert_eq!(result.text, "fallback ok");
        assert_eq!(result.provider_used, "huggingface");
        assert_eq!(result.attempted_providers, vec!["cloudflare", "huggingface"]);
        assert!(result.attempted_providers.contains(&result.provider_used));
        assert_eq!(result.provider_errors.len(), 1);
        assert_eq!(result.provider_errors[0].provider, "cloudflare");
        assert_eq!(first.calls() + second.calls(), 2);
    }

    #[tokio::test]
    async fn test_blank_completion_triggers_fallback() {
        let first = Arc::new(ScriptedProvider::succeeding("cloudflare", "  \n"));
        let second = Arc::new(ScriptedProvider::succeeding("vercel", "real text"));

        let result = complete_with_fallback(&chain(&[&first, &second]), &request())
            .await
            .unwrap();

        assert_eq!(result.provider_used, "vercel");
        assert_eq!(result.attempted_providers.len(), 2);
    }

    #[tokio::test]
    async fn test_all_failures_are_collected_in_order() {
        let first = Arc::new(ScriptedProvider::failing("cloudflare", 401, "HTTP 401"));
        let second = Arc::new(ScriptedProvider::succeeding("huggingface", ""));

        let error = complete_with_fallback(&chain(&[&first, &second]), &request())
            .await
            .unwrap_err();

        match error {
            DomainError::ProvidersExhausted {
                attempted,
                errors,
                status,
            } => {
                assert_eq!(attempted, vec!["cloudflare", "huggingface"]);
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].provider, "cloudflare");
                assert_eq!(errors[0].status_code, 401);
                assert_eq!(errors[1].message, "empty response");
                assert_eq!(status, 500);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_single_provider_makes_exactly_one_call() {
        let only = Arc::new(ScriptedProvider::failing("cloudflare", 503, "HTTP 503"));

        let error = complete_with_fallback(&chain(&[&only]), &request())
            .await
            .unwrap_err();

        assert_eq!(only.calls(), 1);
        assert!(matches!(error, DomainError::ProvidersExhausted { status: 503, .. }));
    }
}
