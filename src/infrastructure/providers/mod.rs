//! Completion provider implementations and discovery

mod cloudflare;
mod discovery;
mod factory;
mod http_client;
mod huggingface;
mod vercel;

pub use cloudflare::CloudflareProvider;
pub use discovery::discover_providers;
pub use factory::ProviderFactory;
pub use http_client::{HttpClient, HttpClientError, HttpClientTrait, HttpResponse};
pub use huggingface::HuggingFaceProvider;
pub use vercel::VercelGatewayProvider;

#[cfg(test)]
pub use http_client::mock::MockHttpClient;
