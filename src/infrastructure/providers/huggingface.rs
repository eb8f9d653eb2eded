use async_trait::async_trait;
use serde_json::Value;

use super::http_client::{HttpClientTrait, HttpResponse};
use crate::domain::{
    first_text, string_at, CompletionProvider, CompletionRequest, ProviderConfig, ProviderError,
    TextExtractor, DEFAULT_ERROR_STATUS,
};

const MAX_NEW_TOKENS: u32 = 512;
const TEMPERATURE: f32 = 0.7;

/// Array-shaped payloads are preferred over object-shaped ones
const EXTRACTORS: &[TextExtractor] = &[
    first_generated_text,
    first_text_field,
    generated_text,
    data_generated_text,
];

/// Hugging Face Inference API provider (prompt-completion style)
#[derive(Debug)]
pub struct HuggingFaceProvider<C: HttpClientTrait> {
    client: C,
    config: ProviderConfig,
}

impl<C: HttpClientTrait> HuggingFaceProvider<C> {
    pub fn new(client: C, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    fn build_request(&self, request: &CompletionRequest) -> Value {
        serde_json::json!({
            "inputs": request.prompt_text(),
            "parameters": {
                "max_new_tokens": MAX_NEW_TOKENS,
                "temperature": TEMPERATURE,
                "return_full_text": false,
            },
        })
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.config.auth_header_value.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, response: HttpResponse) -> Result<String, ProviderError> {
        let name = self.config.name();
        let json = response.json().ok();

        // An `error` field is a failure whatever the status says
        if let Some(error) = json
            .as_ref()
            .and_then(|j| j.get("error"))
            .filter(|e| !e.is_null())
        {
            let status = if response.is_success() {
                DEFAULT_ERROR_STATUS
            } else {
                response.status
            };
            let message = error
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());

            return Err(ProviderError::new(name, message, status));
        }

        if !response.is_success() {
            return Err(ProviderError::http(name, response.status, &response.body));
        }

        let json = json.ok_or_else(|| {
            ProviderError::unclassified(name, "Failed to parse response: invalid JSON")
        })?;

        first_text(&json, EXTRACTORS)
            .map(str::to_string)
            .ok_or_else(|| ProviderError::empty_response(name))
    }
}

#[async_trait]
impl<C: HttpClientTrait> CompletionProvider for HuggingFaceProvider<C> {
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

fn first_generated_text(value: &Value) -> Option<&str> {
    string_at(value, "/0/generated_text")
}

fn first_text_field(value: &Value) -> Option<&str> {
    string_at(value, "/0/text")
}

fn generated_text(value: &Value) -> Option<&str> {
    string_at(value, "/generated_text")
}

fn data_generated_text(value: &Value) -> Option<&str> {
    string_at(value, "/data/0/generated_text")
}
