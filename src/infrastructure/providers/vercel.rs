use async_trait::async_trait;
use serde_json::Value;

use super::http_client::{HttpClientTrait, HttpResponse};
use crate::domain::{
    first_text, string_at, CompletionProvider, CompletionRequest, ProviderConfig, ProviderError,
    TextExtractor,
};

const EXTRACTORS: &[TextExtractor] = &[choice_message_content, choice_text];

/// Vercel AI Gateway provider (OpenAI-compatible chat completions)
#[derive(Debug)]
pub struct VercelGatewayProvider<C: HttpClientTrait> {
    client: C,
    config: ProviderConfig,
}

impl<C: HttpClientTrait> VercelGatewayProvider<C> {
    pub fn new(client: C, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    fn build_request(&self, request: &CompletionRequest) -> Value {
        let mut body = serde_json::json!({ "messages": request.chat_messages() });

        if let Some(ref model) = self.config.model {
            body["model"] = serde_json::json!(model);
        }

        body
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.config.auth_header_value.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, response: HttpResponse) -> Result<String, ProviderError> {
        let name = self.config.name();

        if !response.is_success() {
            return Err(ProviderError::http(name, response.status, &response.body));
        }

        let json = response.json().map_err(|e| {
            ProviderError::unclassified(name, format!("Failed to parse response: {}", e))
        })?;

        if let Some(message) = string_at(&json, "/error/message") {
            return Err(ProviderError::unclassified(name, message));
        }

        first_text(&json, EXTRACTORS)
            .map(str::to_string)
            .ok_or_else(|| ProviderError::empty_response(name))
    }
}

#[async_trait]
impl<C: HttpClientTrait> CompletionProvider for VercelGatewayProvider<C> {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let body = self.build_request(request);
        let response = self
            .client
            .post_json(&self.config.endpoint_url, self.headers(), &body)
            .await
            .map_err(|e| ProviderError::unclassified(self.config.name(), e.to_string()))?;

        self.parse_response(response)
    }

    fn name(&self) -> &str {
        self.config.name()
    }
}

fn choice_message_content(value: &Value) -> Option<&str> {
    string_at(value, "/choices/0/message/content")
}

fn choice_text(value: &Value) -> Option<&str> {
    string_at(value, "/choices/0/text")
}
