//! JSON error payloads and the domain error mapping

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::{DomainError, ProviderError};

/// Error body shared by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempted_providers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_errors: Option<Vec<ProviderError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
    /// Value of the `Allow` header on 405 responses
    pub allow: Option<&'static str>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: message.into(),
                attempted_providers: None,
                provider_errors: None,
                notice: None,
            },
            allow: None,
        }
    }

    pub fn with_attempted(mut self, attempted: &[String]) -> Self {
        self.response.attempted_providers = Some(attempted.to_vec());
        self
    }

    pub fn with_provider_errors(mut self, errors: Vec<ProviderError>) -> Self {
        self.response.provider_errors = Some(errors);
        self
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.response.notice = Some(notice.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn method_not_allowed(allow: &'static str) -> Self {
        let mut err = Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            format!("Method not allowed. Use {}.", allow),
        );
        err.allow = Some(allow);
        err
    }

    pub fn gone(message: impl Into<String>, notice: impl Into<String>) -> Self {
        Self::new(StatusCode::GONE, message).with_notice(notice)
    }
}

/// Public status for an exhausted chain: billing failures pass through,
/// unclassified failures stay 500, everything else is a bad gateway.
fn exhausted_status(last: u16) -> StatusCode {
    match last {
        402 => StatusCode::PAYMENT_REQUIRED,
        500 => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.response)).into_response();

        if let Some(allow) = self.allow {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(allow));
        }

        response
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { message } => Self::bad_request(message),
            DomainError::UnsupportedProvider { name } => {
                Self::bad_request(format!("Unsupported provider '{}'.", name))
            }
            DomainError::NoProvidersConfigured => {
                Self::internal("No AI providers are configured.").with_attempted(&[])
            }
            DomainError::Configuration { message } => Self::internal(message).with_attempted(&[]),
            DomainError::ProvidersExhausted {
                attempted,
                errors,
                status,
            } => Self::new(exhausted_status(status), "All AI providers failed to respond.")
                .with_attempted(&attempted)
                .with_provider_errors(errors),
            DomainError::Retired { message, notice } => Self::gone(message, notice),
            DomainError::Cache { message } | DomainError::Internal { message } => {
                error!(error = %message, "Internal error while handling request");
                Self::internal("Internal server error.")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status.as_u16(), self.response.error)
    }
}

impl std::error::Error for ApiError {}
