//! Operative Lynx analyst chat endpoint

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::info;

use super::briefing::generated_at;
use super::state::AppState;
use super::types::{ApiError, ChatPayload, ChatResponse, Json, ProviderQuery};
use crate::domain::{CompletionRequest, DomainError};

const CHAT_SYSTEM_PROMPT: &str = "You are Operative Lynx, a sharp cybersecurity intelligence analyst \
embedded with a small red team. Answer in a few short paragraphs or bullet points, stay factual, \
flag uncertainty, and never provide instructions that enable attacks on systems the user does not own.";

pub const CHAT_ALLOWED_METHODS: &str = "POST, OPTIONS";

const CORS_HEADERS: [(HeaderName, &str); 3] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, CHAT_ALLOWED_METHODS),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "content-type"),
];

/// Adds the cross-origin headers every chat response carries
fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();

    for (name, value) in CORS_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }

    response
}

/// POST /api/chat
pub async fn post_chat(
    State(state): State<AppState>,
    query: Result<ProviderQuery, ApiError>,
    body: Result<Json<Value>, ApiError>,
) -> Response {
    with_cors(match reply(&state, query, body).await {
        Ok(reply) => Json(reply).into_response(),
        Err(e) => e.into_response(),
    })
}

async fn reply(
    state: &AppState,
    query: Result<ProviderQuery, ApiError>,
    body: Result<Json<Value>, ApiError>,
) -> Result<ChatResponse, ApiError> {
    if !state.features.chat_enabled {
        return Err(DomainError::retired(
            "The live analyst chat has been retired.",
            "AI chat integration removed; responses are no longer generated.",
        )
        .into());
    }

    let query = query?;
    let Json(body) = body?;
    let history = ChatPayload::from_value(body).into_history()?;
    let turns = history.len();
    let request = CompletionRequest::new(CHAT_SYSTEM_PROMPT, history);

    let result = state
        .completion_service
        .complete(&request, &query.selection())
        .await?;

    info!(provider = %result.provider_used, turns, "Chat reply generated");

    Ok(ChatResponse::from_result(result, generated_at()))
}

/// OPTIONS /api/chat
pub async fn chat_options() -> Response {
    with_cors(StatusCode::NO_CONTENT.into_response())
}

pub async fn chat_method_not_allowed() -> Response {
    with_cors(ApiError::method_not_allowed(CHAT_ALLOWED_METHODS).into_response())
}
