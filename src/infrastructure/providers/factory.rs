use std::sync::Arc;

use super::http_client::HttpClientTrait;
use super::{CloudflareProvider, HuggingFaceProvider, VercelGatewayProvider};
use crate::domain::{CompletionProvider, ProviderConfig, ProviderKind};

/// Factory for turning resolved provider configs into callable providers
#[derive(Debug)]
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider for `config` that sends its requests through `client`
    pub fn create<C>(config: &ProviderConfig, client: C) -> Arc<dyn CompletionProvider>
    where
        C: HttpClientTrait + 'static,
    {
        match config.kind {
            ProviderKind::Cloudflare => Arc::new(CloudflareProvider::new(client, config.clone())),
            ProviderKind::HuggingFace => Arc::new(HuggingFaceProvider::new(client, config.clone())),
            ProviderKind::Vercel => Arc::new(VercelGatewayProvider::new(client, config.clone())),
        }
    }

    /// Create providers for a whole chain, preserving its order
    pub fn create_chain<C>(configs: &[&ProviderConfig], client: &C) -> Vec<Arc<dyn CompletionProvider>>
    where
        C: HttpClientTrait + Clone + 'static,
    {
        configs
            .iter()
            .map(|config| Self::create(config, client.clone()))
            .collect()
    }
}
