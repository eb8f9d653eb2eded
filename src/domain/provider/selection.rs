//! Resolution of the ordered provider chain for one request

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ProviderConfig, ProviderKind};
use crate::domain::DomainError;

static TRUTHY_FLAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(1|true|yes|on)\s*$").unwrap());

/// Caller preferences for which providers to try
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderSelection {
    /// Explicitly requested provider, as supplied by the caller
    pub provider: Option<String>,
    /// Opt-in fallback to the remaining providers after an explicit choice
    pub fallback: bool,
}

impl ProviderSelection {
    /// No preference: every available provider in priority order
    pub fn any() -> Self {
        Self::default()
    }

    pub fn named(provider: impl Into<String>) -> Self {
        Self {
            provider: Some(provider.into()),
            fallback: false,
        }
    }

    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    /// Builds a selection from raw query values; blank names count as absent
    pub fn from_query(provider: Option<&str>, fallback: Option<&str>) -> Self {
        Self {
            provider: provider
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            fallback: fallback.is_some_and(is_truthy),
        }
    }
}

/// Whether a query/config flag value means "enabled"
pub fn is_truthy(value: &str) -> bool {
    TRUTHY_FLAG.is_match(value)
}

/// Orders the providers to attempt for `selection`.
///
/// `available` must already be in priority order. No network is involved;
/// every error here is raised before any provider is contacted.
pub fn resolve_chain<'a>(
    available: &'a [ProviderConfig],
    selection: &ProviderSelection,
) -> Result<Vec<&'a ProviderConfig>, DomainError> {
    let requested = selection
        .provider
        .as_deref()
        .map(str::parse::<ProviderKind>)
        .transpose()?;

    if available.is_empty() {
        return Err(DomainError::NoProvidersConfigured);
    }

    let Some(kind) = requested else {
        return Ok(available.iter().collect());
    };

    let explicit = available.iter().find(|p| p.kind == kind);

    if !selection.fallback {
        return explicit.map(|p| vec![p]).ok_or_else(|| {
            DomainError::configuration(format!("Provider '{}' is not configured.", kind))
        });
    }

    let rest = available.iter().filter(|p| p.kind != kind);
    Ok(explicit.into_iter().chain(rest).collect())
}
