use async_trait::async_trait;
use serde_json::Value;

use super::http_client::{HttpClientTrait, HttpResponse};
use crate::domain::{
    first_text, string_at, CompletionProvider, CompletionRequest, ProviderConfig, ProviderError,
    TextExtractor,
};

/// Text locations in a Workers AI `result` envelope, in preference order
const EXTRACTORS: &[TextExtractor] = &[
    result_response,
    result_output_text,
    result_text,
    result_bare_string,
];

/// Cloudflare Workers AI provider (chat-completions style)
#[derive(Debug)]
pub struct CloudflareProvider<C: HttpClientTrait> {
    client: C,
    config: ProviderConfig,
}

impl<C: HttpClientTrait> CloudflareProvider<C> {
    pub fn new(client: C, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    fn build_request(&self, request: &CompletionRequest) -> Value {
        serde_json::json!({ "messages": request.chat_messages() })
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

        if json.get("success").and_then(Value::as_bool) == Some(false) {
            return Err(ProviderError::unclassified(name, error_summary(&json)));
        }

        first_text(&json, EXTRACTORS)
            .map(str::to_string)
            .ok_or_else(|| ProviderError::empty_response(name))
    }
}

#[async_trait]
impl<C: HttpClientTrait> CompletionProvider for CloudflareProvider<C> {
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

fn result_response(value: &Value) -> Option<&str> {
    string_at(value, "/result/response")
}

fn result_output_text(value: &Value) -> Option<&str> {
    string_at(value, "/result/output_text")
}

fn result_text(value: &Value) -> Option<&str> {
    string_at(value, "/result/text")
}

fn result_bare_string(value: &Value) -> Option<&str> {
    string_at(value, "/result")
}

/// Joins the `errors[].message` entries of a failed Workers AI envelope
fn error_summary(json: &Value) -> String {
    let messages: Vec<&str> = json
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if messages.is_empty() {
        "request unsuccessful".to_string()
    } else {
        messages.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProviderKind;
    use crate::infrastructure::providers::http_client::mock::MockHttpClient;
    use serde_json::json;

    const TEST_URL: &str = "https://api.cloudflare.com/client/v4/accounts/acct/ai/run/@cf/meta/llama-3-8b-instruct";

    fn provider(client: MockHttpClient) -> CloudflareProvider<MockHttpClient> {
        CloudflareProvider::new(
            client,
            ProviderConfig::bearer(ProviderKind::Cloudflare, TEST_URL, "cf-token"),
        )
    }

    fn ping() -> CompletionRequest {
        CompletionRequest::builder().system("sys").user("ping").build()
    }

    #[tokio::test]
    async fn test_complete_returns_response_text() {
        let client = MockHttpClient::new().with_json(TEST_URL, 200, json!({"result": {"response": "pong"}}));
        let provider = provider(client);

        let text = provider.complete(&ping()).await.unwrap();
        assert_eq!(text, "pong");
    }

    #[tokio::test]
    async fn test_request_shape() {
        let client = MockHttpClient::new().with_json(TEST_URL, 200, json!({"result": {"response": "pong"}}));
        let provider = provider(client);

        provider.complete(&ping()).await.unwrap();

        let requests = provider.client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, TEST_URL);
        assert!(requests[0]
            .headers
            .contains(&("Authorization".to_string(), "Bearer cf-token".to_string())));
        assert_eq!(
            requests[0].body,
            json!({"messages": [
                {"role": "system", "content": "sys"},
                {"role": "user", "content": "ping"}
            ]})
        );
    }

    #[test]
    fn test_extraction_precedence() {
        let all = json!({"result": {"response": "a", "output_text": "b", "text": "c"}});
        assert_eq!(first_text(&all, EXTRACTORS), Some("a"));

        let without_response = json!({"result": {"output_text": "b", "text": "c"}});
        assert_eq!(first_text(&without_response, EXTRACTORS), Some("b"));

        let text_only = json!({"result": {"text": "c"}});
        assert_eq!(first_text(&text_only, EXTRACTORS), Some("c"));

        let bare = json!({"result": "d"});
        assert_eq!(first_text(&bare, EXTRACTORS), Some("d"));
    }

    #[tokio::test]
    async fn test_non_2xx_is_http_error_with_excerpt() {
        let body = format!("upstream exploded {}", "!".repeat(600));
        let client = MockHttpClient::new().with_body(TEST_URL, 500, body);

        let error = provider(client).complete(&ping()).await.unwrap_err();

        assert_eq!(error.provider, "cloudflare");
        assert_eq!(error.status_code, 500);
        assert!(error.message.starts_with("HTTP 500: upstream exploded"));
        assert!(error.message.chars().count() <= 280);
    }

    #[tokio::test]
    async fn test_empty_text_is_failure() {
        let client = MockHttpClient::new().with_json(TEST_URL, 200, json!({"result": {"response": ""}}));

        let error = provider(client).complete(&ping()).await.unwrap_err();
        assert_eq!(error.message, "empty response");
        assert_eq!(error.status_code, 500);
    }

    #[tokio::test]
    async fn test_non_string_result_is_failure() {
        let client = MockHttpClient::new().with_json(TEST_URL, 200, json!({"result": {"usage": 12}}));

        let error = provider(client).complete(&ping()).await.unwrap_err();
        assert_eq!(error.message, "empty response");
    }

    #[tokio::test]
    async fn test_unsuccessful_envelope() {
        let client = MockHttpClient::new().with_json(
            TEST_URL,
            200,
            json!({"success": false, "errors": [{"code": 5007, "message": "No such model"}], "result": null}),
        );

        let error = provider(client).complete(&ping()).await.unwrap_err();
        assert_eq!(error.message, "No such model");
    }

    #[tokio::test]
    async fn test_invalid_json_is_failure() {
        let client = MockHttpClient::new().with_body(TEST_URL, 200, "<html>gateway</html>");

        let error = provider(client).complete(&ping()).await.unwrap_err();
        assert!(error.message.starts_with("Failed to parse response"));
        assert_eq!(error.status_code, 500);
    }

    #[tokio::test]
    async fn test_transport_error_defaults_to_500() {
        let client = MockHttpClient::new().with_error(TEST_URL, "connection reset");

        let error = provider(client).complete(&ping()).await.unwrap_err();
        assert_eq!(error.status_code, 500);
        assert!(error.message.contains("connection reset"));
    }
}
