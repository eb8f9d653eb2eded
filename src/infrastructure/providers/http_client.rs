use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::domain::DomainError;

/// Raw upstream response: status plus undecoded body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Transport-level failures; HTTP error statuses are not errors here
#[derive(Debug, Error)]
pub enum HttpClientError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Trait for HTTP client operations (for mocking)
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, HttpClientError>;
}

#[async_trait]
impl<T: HttpClientTrait + ?Sized> HttpClientTrait for Arc<T> {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, HttpClientError> {
        (**self).post_json(url, headers, body).await
    }
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpClient {
    /// Builds a client whose every request is bounded by `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("briefing-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, HttpClientError> {
        let mut request = self.client.post(url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request.json(body).send().await.map_err(|e| {
            if e.is_timeout() {
                HttpClientError::Timeout(self.timeout)
            } else {
                HttpClientError::Request(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                HttpClientError::Timeout(self.timeout)
            } else {
                HttpClientError::Body(e.to_string())
            }
        })?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, RwLock};

    #[derive(Debug, Clone)]
    enum MockReply {
        Response(HttpResponse),
        Error(String),
    }

    /// A request the mock received
    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub url: String,
        pub headers: Vec<(String, String)>,
        pub body: serde_json::Value,
    }

    #[derive(Debug, Default)]
    pub struct MockHttpClient {
        replies: RwLock<HashMap<String, MockReply>>,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_json(self, url: impl Into<String>, status: u16, body: serde_json::Value) -> Self {
            self.with_body(url, status, body.to_string())
        }

        pub fn with_body(self, url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
            self.replies
                .write()
                .unwrap()
                .insert(url.into(), MockReply::Response(HttpResponse::new(status, body)));
            self
        }

        pub fn with_error(self, url: impl Into<String>, error: impl Into<String>) -> Self {
            self.replies
                .write()
                .unwrap()
                .insert(url.into(), MockReply::Error(error.into()));
            self
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl HttpClientTrait for MockHttpClient {
        async fn post_json(
            &self,
            url: &str,
            headers: Vec<(&str, &str)>,
            body: &serde_json::Value,
        ) -> Result<HttpResponse, HttpClientError> {
            self.requests.lock().unwrap().push(RecordedRequest {
                url: url.to_string(),
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                body: body.clone(),
            });

            match self.replies.read().unwrap().get(url) {
                Some(MockReply::Response(response)) => Ok(response.clone()),
                Some(MockReply::Error(error)) => Err(HttpClientError::Request(error.clone())),
                None => Err(HttpClientError::Request(format!("No mock response for {}", url))),
            }
        }
    }
}
