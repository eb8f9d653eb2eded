//! Application configuration and the provider environment snapshot

mod app_config;
mod provider_env;

pub use app_config::{
    AppConfig, CacheConfig, FeaturesConfig, LogFormat, LoggingConfig, ProvidersConfig,
    ServerConfig,
};
pub use provider_env::ProviderEnvironment;
