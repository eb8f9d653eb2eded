//! Providers command - shows the discovered fallback chain

use clap::Args;
use serde::Serialize;

use crate::config::ProviderEnvironment;
use crate::domain::{DomainError, ProviderConfig};
use crate::infrastructure::providers::discover_providers;

#[derive(Debug, Clone, Default, Args)]
pub struct ProvidersArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// One discovered provider with its credential masked
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProviderSummary {
    priority: usize,
    name: &'static str,
    model: Option<String>,
    endpoint_url: String,
    authorization: String,
}

impl ProviderSummary {
    fn new(priority: usize, config: &ProviderConfig) -> Self {
        Self {
            priority,
            name: config.name(),
            model: config.model.clone(),
            endpoint_url: config.endpoint_url.clone(),
            authorization: config.redacted_auth(),
        }
    }
}

pub fn run(args: ProvidersArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let output = render(&ProviderEnvironment::from_process(), args.json)?;
    println!("{}", output);
    Ok(())
}

fn summarize(env: &ProviderEnvironment) -> Result<Vec<ProviderSummary>, DomainError> {
    Ok(discover_providers(env)?
        .iter()
        .enumerate()
        .map(|(i, config)| ProviderSummary::new(i + 1, config))
        .collect())
}

fn render(env: &ProviderEnvironment, json: bool) -> anyhow::Result<String> {
    let summaries = summarize(env)?;

    if json {
        return Ok(serde_json::to_string_pretty(&summaries)?);
    }

    if summaries.is_empty() {
        return Ok("No AI providers are configured.".to_string());
    }

    let lines: Vec<String> = summaries
        .iter()
        .map(|s| {
            format!(
                "{}. {:<12} {:<40} {}\n   {}",
                s.priority,
                s.name,
                s.model.as_deref().unwrap_or("-"),
                s.authorization,
                s.endpoint_url
            )
        })
        .collect();

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_masks_tokens() {
        let env = ProviderEnvironment::default()
            .with("CLOUDFLARE_ACCOUNT_ID", "acct")
            .with("CLOUDFLARE_AI_TOKEN", "cf-super-secret-1234")
            .with("HF_TOKEN", "hf_abcdefgh");

        let output = render(&env, false).unwrap();

        assert!(output.starts_with("1. cloudflare"));
        assert!(output.contains("2. huggingface"));
        assert!(output.contains("Bearer ****1234"));
        assert!(!output.contains("cf-super-secret"));
        assert!(!output.contains("hf_abcdefgh"));
    }

    #[test]
    fn test_render_json() {
        let env = ProviderEnvironment::default().with("VERCEL_AI_GATEWAY_API_KEY", "vk_0123456789");

        let output = render(&env, true).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json[0]["name"], "vercel");
        assert_eq!(json[0]["model"], "openai/gpt-4o-mini");
        assert_eq!(json[0]["endpointUrl"], "https://ai-gateway.vercel.sh/v1/chat/completions");
        assert_eq!(json[0]["authorization"], "Bearer ****6789");
    }

    #[test]
    fn test_render_without_providers() {
        let output = render(&ProviderEnvironment::default(), false).unwrap();
        assert_eq!(output, "No AI providers are configured.");
    }

    #[test]
    fn test_render_surfaces_configuration_errors() {
        let env = ProviderEnvironment::default()
            .with("HF_TOKEN", "hf_abcdefgh")
            .with("HUGGINGFACE_API_URL", "ftp//broken");

        assert!(render(&env, false).is_err());
    }
}
