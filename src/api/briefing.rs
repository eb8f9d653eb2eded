//! Daily intelligence briefing endpoint

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, Uri},
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use tracing::{info, warn};

use super::state::AppState;
use super::types::{ApiError, BriefingResponse, Json, ProviderQuery};
use crate::domain::{CompletionRequest, DomainError};

const BRIEFING_SYSTEM_PROMPT: &str =
    "You are a world-class cybersecurity intelligence analyst. Provide concise daily threat intel.";

const BRIEFING_USER_PROMPT: &str = "Summarize today's most significant cybersecurity developments. Include:\n\n\
1. One major, publicly disclosed data breach.\n\
2. One new or updated tool relevant to ethical hacking or defense.\n\
3. One significant update to a major security operating system like Kali Linux or Parrot OS.\n\n\
Format the response with headings for \"Recent Data Breaches\", \"New Tools & Exploits\", and \"Platform Updates\".";

const CACHE_STATUS_HEADER: &str = "x-cache";

pub fn briefing_request() -> CompletionRequest {
    CompletionRequest::builder()
        .system(BRIEFING_SYSTEM_PROMPT)
        .user(BRIEFING_USER_PROMPT)
        .build()
}

pub(crate) fn generated_at() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// GET /api/briefing
///
/// Served from the response cache when a fresh entry exists for the same
/// request identity; otherwise generated and cached in the background.
pub async fn get_briefing(
    State(state): State<AppState>,
    query: ProviderQuery,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    if !state.features.briefing_enabled {
        return Err(DomainError::retired(
            "The daily briefing endpoint has been retired.",
            "Live AI briefings were removed; archived briefings remain available.",
        )
        .into());
    }

    let cache_key = state
        .response_cache
        .key_for(method.as_str(), &uri.to_string(), &headers);

    if let Some(cached) = state.response_cache.get::<BriefingResponse>(&cache_key).await {
        return Ok(briefing_response(&state, cached, "hit"));
    }

    let result = state
        .completion_service
        .complete(&briefing_request(), &query.selection())
        .await?;

    info!(
        provider = %result.provider_used,
        attempted = result.attempted_providers.len(),
        "Briefing generated"
    );

    let body = BriefingResponse::from_result(result, generated_at());
    let response = briefing_response(&state, body.clone(), "miss");

    // Written after the response exists; the caller never waits on it
    state.response_cache.store(cache_key, body);

    Ok(response)
}

fn briefing_response(state: &AppState, body: BriefingResponse, cache_status: &'static str) -> Response {
    let mut response = Json(body).into_response();
    let headers = response.headers_mut();

    headers.insert(CACHE_STATUS_HEADER, HeaderValue::from_static(cache_status));

    match HeaderValue::from_str(&state.response_cache.cache_control()) {
        Ok(value) => {
            headers.insert(header::CACHE_CONTROL, value);
        }
        Err(e) => warn!(error = %e, "Invalid cache-control value"),
    }

    response
}

pub async fn briefing_method_not_allowed() -> ApiError {
    ApiError::method_not_allowed("GET")
}
