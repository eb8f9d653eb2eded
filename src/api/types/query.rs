//! Provider selection query parameters

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use tracing::debug;

use super::error::ApiError;
use crate::domain::ProviderSelection;

/// Message for every query string that cannot be parsed
pub const INVALID_QUERY_MESSAGE: &str = "Invalid query string.";

/// `?provider=<name>&fallback=<flag>`
///
/// Extracts directly from the request so malformed query strings are
/// answered in the API error format.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderQuery {
    pub provider: Option<String>,
    pub fallback: Option<String>,
}

impl ProviderQuery {
    pub fn selection(&self) -> ProviderSelection {
        ProviderSelection::from_query(self.provider.as_deref(), self.fallback.as_deref())
    }
}

impl<S> FromRequestParts<S> for ProviderQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<ProviderQuery>::from_request_parts(parts, state)
            .await
            .map(|Query(query)| query)
            .map_err(|rejection| {
                debug!(error = %rejection.body_text(), "Rejected query string");
                ApiError::bad_request(INVALID_QUERY_MESSAGE)
            })
    }
}
