//! Request/response logging middleware with header redaction

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Logs each request and its outcome.
///
/// Spans come from `TraceLayer`; this middleware only emits events.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = extract_path(&request);
    let query = request.uri().query().unwrap_or("").to_string();
    let request_id = extract_request_id(request.headers());

    info!(
        method = %method,
        path = %path,
        query = %query,
        request_id = %request_id,
        headers = %redact_headers(request.headers()),
        "Incoming request"
    );

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        warn!(method = %method, path = %path, status, duration_ms, request_id = %request_id, "Request failed");
    } else {
        info!(method = %method, path = %path, status, duration_ms, request_id = %request_id, "Request completed");
    }

    response
}

fn extract_path(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

fn extract_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// Loggable headers, with credential-bearing values masked
fn redact_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .filter(|(name, _)| should_log_header(name.as_str()))
        .map(|(name, value)| {
            let value = if is_sensitive_header(name.as_str()) {
                "[REDACTED]"
            } else {
                value.to_str().unwrap_or("[invalid]")
            };
            format!("{}={}", name, value)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_sensitive_header(name: &str) -> bool {
    matches!(
        name,
        "authorization" | "proxy-authorization" | "cookie" | "set-cookie" | "x-api-key"
    )
}

fn should_log_header(name: &str) -> bool {
    matches!(
        name,
        "content-type"
            | "content-length"
            | "accept"
            | "origin"
            | "user-agent"
            | "x-forwarded-for"
            | "authorization"
            | "cookie"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_redact_headers_masks_credentials() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer secret-token"));
        headers.insert("accept", HeaderValue::from_static("application/json"));
        headers.insert("x-internal", HeaderValue::from_static("skip"));

        let logged = redact_headers(&headers);

        assert!(logged.contains("authorization=[REDACTED]"));
        assert!(logged.contains("accept=application/json"));
        assert!(!logged.contains("secret-token"));
        assert!(!logged.contains("x-internal"));
    }

    #[test]
    fn test_request_id_prefers_header() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("req-42"));
        assert_eq!(extract_request_id(&headers), "req-42");

        let generated = extract_request_id(&HeaderMap::new());
        assert!(uuid::Uuid::parse_str(&generated).is_ok());
    }
}
