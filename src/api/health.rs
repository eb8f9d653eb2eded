//! Health check endpoints for container probes

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::state::AppState;
use super::types::Json;

/// Health response with optional component status
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Individual component health check
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub providers: Option<Vec<String>>,
}

/// Returns 200 whenever the process is serving requests
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
        latency_ms: None,
    };

    (StatusCode::OK, Json(response))
}

/// Readiness: reports which completion providers are configured.
///
/// No provider is contacted. Missing providers only degrade readiness;
/// a malformed provider configuration makes the service unhealthy.
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let providers = check_providers(&state);

    let overall_status = providers.status;
    let response = HealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(vec![providers]),
        latency_ms: Some(start.elapsed().as_millis() as u64),
    };

    let status_code = match overall_status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

fn check_providers(state: &AppState) -> HealthCheck {
    match state.completion_service.available_providers() {
        Ok(available) if available.is_empty() => HealthCheck {
            name: "providers".to_string(),
            status: HealthStatus::Degraded,
            message: Some("No AI providers are configured.".to_string()),
            providers: Some(vec![]),
        },
        Ok(available) => HealthCheck {
            name: "providers".to_string(),
            status: HealthStatus::Healthy,
            message: None,
            providers: Some(available.iter().map(|p| p.name().to_string()).collect()),
        },
        Err(e) => HealthCheck {
            name: "providers".to_string(),
            status: HealthStatus::Unhealthy,
            message: Some(e.to_string()),
            providers: None,
        },
    }
}
