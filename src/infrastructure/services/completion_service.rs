//! Completion service: discovery, chain resolution and fallback per request

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::config::ProviderEnvironment;
use crate::domain::{
    complete_with_fallback, resolve_chain, CompletionRequest, CompletionResult, DomainError,
    ProviderConfig, ProviderSelection,
};
use crate::infrastructure::providers::{discover_providers, HttpClientTrait, ProviderFactory};

#[cfg(test)]
use mockall::automock;

/// Trait for completion operations used by the HTTP handlers
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CompletionServiceTrait: Send + Sync + Debug {
    /// Resolve the provider chain for `selection` and run the fallback loop
    async fn complete(
        &self,
        request: &CompletionRequest,
        selection: &ProviderSelection,
    ) -> Result<CompletionResult, DomainError>;

    /// Providers currently available, in priority order
    fn available_providers(&self) -> Result<Vec<ProviderConfig>, DomainError>;
}

/// Completion service backed by the provider environment snapshot
///
/// Discovery runs on every call so configuration errors surface as
/// request failures rather than startup failures.
#[derive(Debug)]
pub struct CompletionService<C: HttpClientTrait> {
    env: Arc<ProviderEnvironment>,
    client: C,
}

impl<C: HttpClientTrait + Clone + 'static> CompletionService<C> {
    pub fn new(env: Arc<ProviderEnvironment>, client: C) -> Self {
        Self { env, client }
    }
}

#[async_trait]
impl<C: HttpClientTrait + Clone + 'static> CompletionServiceTrait for CompletionService<C> {
    async fn complete(
        &self,
        request: &CompletionRequest,
        selection: &ProviderSelection,
    ) -> Result<CompletionResult, DomainError> {
        let available = discover_providers(&self.env)?;
        let chain = resolve_chain(&available, selection)?;

        debug!(
            chain = ?chain.iter().map(|p| p.name()).collect::<Vec<_>>(),
            requested = ?selection.provider,
            fallback = selection.fallback,
            "Resolved provider chain"
        );

        let providers = ProviderFactory::create_chain(&chain, &self.client);
        complete_with_fallback(&providers, request).await
    }

    fn available_providers(&self) -> Result<Vec<ProviderConfig>, DomainError> {
        discover_providers(&self.env)
    }
}
