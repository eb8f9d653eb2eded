//! Briefing Gateway
//!
//! An HTTP relay in front of hosted text-completion APIs (Cloudflare
//! Workers AI, Hugging Face Inference, Vercel AI Gateway) with:
//! - Provider discovery from environment-style configuration
//! - Ordered fallback across providers with per-provider error reports
//! - Response normalization across heterogeneous payload shapes
//! - A shared TTL cache for the daily briefing

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use api::state::AppState;
use config::ProviderEnvironment;
use infrastructure::cache::{InMemoryCache, InMemoryCacheConfig};
use infrastructure::providers::HttpClient;
use infrastructure::services::{
    CompletionService, CompletionServiceTrait, ResponseCacheConfig, ResponseCacheService,
};

/// Create the application state from configuration and a provider environment
pub fn create_app_state(config: &AppConfig, env: ProviderEnvironment) -> anyhow::Result<AppState> {
    let client = HttpClient::with_timeout(Duration::from_secs(config.providers.timeout_secs))?;
    let completion_service = Arc::new(CompletionService::new(Arc::new(env), client));

    match completion_service.available_providers() {
        Ok(available) => info!(
            providers = ?available.iter().map(|p| p.name()).collect::<Vec<_>>(),
            "Completion providers discovered"
        ),
        Err(e) => warn!(error = %e, "Provider configuration is invalid; requests will fail"),
    }

    let cache = InMemoryCache::with_config(
        InMemoryCacheConfig::default().with_max_capacity(config.cache.max_capacity),
    );
    let mut cache_config = ResponseCacheConfig::default()
        .with_ttl(Duration::from_secs(config.cache.ttl_secs))
        .with_vary_headers(config.cache.vary_headers.iter().cloned());

    if !config.cache.enabled {
        cache_config = cache_config.disabled();
    }

    let response_cache = ResponseCacheService::new(Arc::new(cache), cache_config);

    Ok(AppState::new(
        completion_service,
        response_cache,
        config.features.clone(),
    ))
}
