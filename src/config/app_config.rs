use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub providers: ProvidersConfig,
    pub cache: CacheConfig,
    pub features: FeaturesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Outbound provider call settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Per-attempt timeout; expiry counts as a provider failure
    pub timeout_secs: u64,
}

/// Shared response cache for the briefing endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Freshness window, also advertised as `s-maxage`
    pub ttl_secs: u64,
    pub max_capacity: u64,
    /// Request headers folded into the cache key
    pub vary_headers: Vec<String>,
}

/// Endpoint switches; a disabled endpoint answers 410 Gone
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    pub briefing_enabled: bool,
    pub chat_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 7200,
            max_capacity: 1_000,
            vary_headers: vec!["accept".to_string()],
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            briefing_enabled: true,
            chat_enabled: true,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cache.vary_headers"),
            )
            .build()?;

        config.try_deserialize()
    }
}
