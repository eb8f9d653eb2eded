//! JSON body extractor that answers malformed input with the API error format

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::ApiError;

/// Message for every body that cannot be read or parsed
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON payload.";

/// JSON extractor that ignores `Content-Type` and rejects with [`ApiError`]
///
/// Clients of the chat endpoint do not always send a JSON content type, so
/// only the body itself decides whether the payload is valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T> std::ops::Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            debug!(error = %rejection.body_text(), "Failed to read request body");
            ApiError::bad_request(INVALID_JSON_MESSAGE)
        })?;

        serde_json::from_slice(&bytes).map(Json).map_err(|e| {
            debug!(error = %e, "Rejected request body");
            ApiError::bad_request(INVALID_JSON_MESSAGE)
        })
    }
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}
