//! Provider discovery from the environment snapshot

use reqwest::Url;

use crate::config::ProviderEnvironment;
use crate::domain::{DomainError, ProviderConfig, ProviderKind};

pub const CLOUDFLARE_ACCOUNT_ENV: &str = "CLOUDFLARE_ACCOUNT_ID";
pub const CLOUDFLARE_TOKEN_ENVS: &[&str] = &[
    "CLOUDFLARE_AI_TOKEN",
    "AI_GATEWAY_API_KEY",
    "CLOUDFLARE_API_TOKEN",
    "WORKERS_AI_TOKEN",
];
pub const CLOUDFLARE_MODEL_ENV: &str = "CLOUDFLARE_AI_MODEL";
pub const CLOUDFLARE_BASE_URL_ENV: &str = "CLOUDFLARE_AI_BASE_URL";
pub const CLOUDFLARE_GATEWAY_ENV: &str = "CLOUDFLARE_AI_GATEWAY";

pub const HUGGINGFACE_TOKEN_ENVS: &[&str] = &["HUGGINGFACE_API_KEY", "HF_API_TOKEN", "HF_TOKEN"];
pub const HUGGINGFACE_MODEL_ENV: &str = "HUGGINGFACE_MODEL";
pub const HUGGINGFACE_URL_ENV: &str = "HUGGINGFACE_API_URL";

pub const VERCEL_TOKEN_ENVS: &[&str] = &["VERCEL_AI_GATEWAY_API_KEY", "VERCEL_AI_GATEWAY_TOKEN"];
pub const VERCEL_MODEL_ENV: &str = "VERCEL_AI_MODEL";
pub const VERCEL_URL_ENV: &str = "VERCEL_AI_GATEWAY_URL";

const CLOUDFLARE_PLACEHOLDER_ACCOUNT: &str = "demo-account-id";
const CLOUDFLARE_PLACEHOLDER_TOKEN: &str = "demo-api-token";
const HUGGINGFACE_PLACEHOLDER_TOKEN: &str = "demo-hf-token";
const VERCEL_PLACEHOLDER_TOKEN: &str = "demo-gateway-key";

pub const DEFAULT_CLOUDFLARE_MODEL: &str = "@cf/meta/llama-3-8b-instruct";
pub const DEFAULT_HUGGINGFACE_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";
pub const DEFAULT_VERCEL_MODEL: &str = "openai/gpt-4o-mini";

const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";
const CLOUDFLARE_GATEWAY_BASE: &str = "https://gateway.ai.cloudflare.com/v1";
const HUGGINGFACE_API_BASE: &str = "https://api-inference.huggingface.co/models";
const VERCEL_GATEWAY_BASE: &str = "https://ai-gateway.vercel.sh/v1";

/// Every available provider, in [`ProviderKind::PRIORITY`] order.
///
/// A provider is available when its credentials are present and are not a
/// placeholder. Malformed URL overrides on an available provider are
/// configuration errors.
pub fn discover_providers(env: &ProviderEnvironment) -> Result<Vec<ProviderConfig>, DomainError> {
    let mut available = Vec::new();

    for kind in ProviderKind::PRIORITY {
        let discovered = match kind {
            ProviderKind::Cloudflare => discover_cloudflare(env)?,
            ProviderKind::HuggingFace => discover_huggingface(env)?,
            ProviderKind::Vercel => discover_vercel(env)?,
        };

        available.extend(discovered);
    }

    Ok(available)
}

fn credential<'a>(env: &'a ProviderEnvironment, keys: &[&str], placeholder: &str) -> Option<&'a str> {
    env.first_of(keys).filter(|value| *value != placeholder)
}

fn discover_cloudflare(env: &ProviderEnvironment) -> Result<Option<ProviderConfig>, DomainError> {
    let Some(account) = credential(env, &[CLOUDFLARE_ACCOUNT_ENV], CLOUDFLARE_PLACEHOLDER_ACCOUNT)
    else {
        return Ok(None);
    };
    let Some(token) = credential(env, CLOUDFLARE_TOKEN_ENVS, CLOUDFLARE_PLACEHOLDER_TOKEN) else {
        return Ok(None);
    };

    let model = normalize_model(env.get(CLOUDFLARE_MODEL_ENV).unwrap_or(DEFAULT_CLOUDFLARE_MODEL));

    let endpoint = match (env.get(CLOUDFLARE_BASE_URL_ENV), env.get(CLOUDFLARE_GATEWAY_ENV)) {
        (Some(base_url), _) => format!("{}{}", directory_url(base_url, CLOUDFLARE_BASE_URL_ENV)?, model),
        (None, Some(gateway)) => format!(
            "{}/{}/{}/workers-ai/{}",
            CLOUDFLARE_GATEWAY_BASE,
            account,
            gateway.trim_matches('/'),
            model
        ),
        (None, None) => format!("{}/accounts/{}/ai/run/{}", CLOUDFLARE_API_BASE, account, model),
    };

    Ok(Some(
        ProviderConfig::bearer(ProviderKind::Cloudflare, endpoint, token).with_model(model),
    ))
}

fn discover_huggingface(env: &ProviderEnvironment) -> Result<Option<ProviderConfig>, DomainError> {
    let Some(token) = credential(env, HUGGINGFACE_TOKEN_ENVS, HUGGINGFACE_PLACEHOLDER_TOKEN) else {
        return Ok(None);
    };

    let model = normalize_model(env.get(HUGGINGFACE_MODEL_ENV).unwrap_or(DEFAULT_HUGGINGFACE_MODEL));

    let endpoint = match env.get(HUGGINGFACE_URL_ENV) {
        Some(url) => absolute_url(url, HUGGINGFACE_URL_ENV)?.to_string(),
        None => format!("{}/{}", HUGGINGFACE_API_BASE, model),
    };

    Ok(Some(
        ProviderConfig::bearer(ProviderKind::HuggingFace, endpoint, token).with_model(model),
    ))
}

fn discover_vercel(env: &ProviderEnvironment) -> Result<Option<ProviderConfig>, DomainError> {
    let Some(token) = credential(env, VERCEL_TOKEN_ENVS, VERCEL_PLACEHOLDER_TOKEN) else {
        return Ok(None);
    };

    let model = env.get(VERCEL_MODEL_ENV).unwrap_or(DEFAULT_VERCEL_MODEL).to_string();

    let base = match env.get(VERCEL_URL_ENV) {
        Some(url) => directory_url(url, VERCEL_URL_ENV)?,
        None => format!("{}/", VERCEL_GATEWAY_BASE),
    };

    Ok(Some(
        ProviderConfig::bearer(ProviderKind::Vercel, format!("{}chat/completions", base), token)
            .with_model(model),
    ))
}

fn normalize_model(model: &str) -> String {
    model.trim_start_matches('/').to_string()
}

fn absolute_url(value: &str, key: &str) -> Result<Url, DomainError> {
    Url::parse(value)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base())
        .ok_or_else(|| DomainError::configuration(format!("{} must be a valid absolute URL.", key)))
}

/// Absolute URL rendered with a trailing `/` on its path, ready for appending
fn directory_url(value: &str, key: &str) -> Result<String, DomainError> {
    let mut url = absolute_url(value, key)?;

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url.to_string())
}
