use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Known upstream provider kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Cloudflare Workers AI (chat-completions style)
    Cloudflare,
    /// Hugging Face Inference API (prompt-completion style)
    HuggingFace,
    /// Vercel AI Gateway (OpenAI-compatible)
    Vercel,
}

impl ProviderKind {
    /// Fixed priority order used for discovery and implicit fallback
    pub const PRIORITY: [ProviderKind; 3] = [Self::Cloudflare, Self::HuggingFace, Self::Vercel];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Cloudflare => "cloudflare",
            Self::HuggingFace => "huggingface",
            Self::Vercel => "vercel",
        }
    }

    /// Resolves a caller-supplied provider name, accepting common aliases
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "cloudflare" | "workers-ai" | "workersai" | "cf" => Some(Self::Cloudflare),
            "huggingface" | "hugging-face" | "hf" => Some(Self::HuggingFace),
            "vercel" | "vercel-ai" | "ai-gateway" => Some(Self::Vercel),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DomainError::unsupported_provider(s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names_round_trip() {
        for kind in ProviderKind::PRIORITY {
            assert_eq!(ProviderKind::parse(kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_aliases_are_case_insensitive() {
        assert_eq!(ProviderKind::parse("HF"), Some(ProviderKind::HuggingFace));
        assert_eq!(ProviderKind::parse(" Workers-AI "), Some(ProviderKind::Cloudflare));
        assert_eq!(ProviderKind::parse("AI-Gateway"), Some(ProviderKind::Vercel));
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let error = "openrouter".parse::<ProviderKind>().unwrap_err();
        assert!(matches!(error, DomainError::UnsupportedProvider { ref name } if name == "openrouter"));
    }

    #[test]
    fn test_priority_starts_with_cloudflare() {
        assert_eq!(ProviderKind::PRIORITY[0], ProviderKind::Cloudflare);
    }

    #[test]
    fn test_serde_names_match_display() {
        let json = serde_json::to_string(&ProviderKind::HuggingFace).unwrap();
        assert_eq!(json, "\"huggingface\"");
        assert_eq!(ProviderKind::HuggingFace.to_string(), "huggingface");
    }
}
