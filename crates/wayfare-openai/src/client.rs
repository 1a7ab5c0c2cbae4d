// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for OpenAI-compatible APIs.
//!
//! Provides [`OpenAiClient`] which handles request construction, bearer
//! authentication, error body decoding, and transient error retry for the
//! chat completions and embeddings endpoints.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use wayfare_core::WayfareError;

use crate::types::{
    ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse, EmbeddingsRequest,
    EmbeddingsResponse,
};

/// Which API surface a request targets. Determines the URL path and which
/// error variant failures map to.
#[derive(Debug, Clone, Copy)]
enum Endpoint {
    Chat,
    Embeddings,
}

impl Endpoint {
    fn path(self) -> &'static str {
        match self {
            Endpoint::Chat => "/chat/completions",
            Endpoint::Embeddings => "/embeddings",
        }
    }

    fn error(
        self,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> WayfareError {
        match self {
            Endpoint::Chat => WayfareError::Generation { message, source },
            Endpoint::Embeddings => WayfareError::Embedding { message, source },
        }
    }
}

/// HTTP client for OpenAI-compatible API communication.
///
/// Manages authentication headers, connection pooling, and retry logic
/// for transient errors (429, 500, 503).
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl OpenAiClient {
    /// Creates a new client against the given base URL (e.g.,
    /// "https://api.openai.com/v1").
    pub fn new(api_key: &str, base_url: impl Into<String>) -> Result<Self, WayfareError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
            WayfareError::Config(format!("invalid API key header value: {e}"))
        })?;
        auth.set_sensitive(true);
        headers.insert("authorization", auth);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| WayfareError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_retries: 1,
        })
    }

    /// Sends a chat completion request.
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, WayfareError> {
        self.post_json(Endpoint::Chat, request).await
    }

    /// Sends an embeddings request.
    pub async fn embeddings(
        &self,
        request: &EmbeddingsRequest,
    ) -> Result<EmbeddingsResponse, WayfareError> {
        self.post_json(Endpoint::Embeddings, request).await
    }

    /// Posts a JSON body and decodes the JSON response.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second delay.
    async fn post_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: &impl Serialize,
    ) -> Result<T, WayfareError> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, url = url.as_str(), "retrying request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&url)
                .json(body)
                .send()
                .await
                .map_err(|e| {
                    endpoint.error(format!("HTTP request failed: {e}"), Some(Box::new(e)))
                })?;

            let status = response.status();
            debug!(status = %status, attempt, url = url.as_str(), "response received");

            if status.is_success() {
                let text = response.text().await.map_err(|e| {
                    endpoint.error(format!("failed to read response body: {e}"), Some(Box::new(e)))
                })?;
                return serde_json::from_str(&text).map_err(|e| {
                    endpoint.error(format!("failed to parse API response: {e}"), Some(Box::new(e)))
                });
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let text = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %text, "transient error, will retry");
                last_error = Some(endpoint.error(format!("API returned {status}: {text}"), None));
                continue;
            }

            // Non-transient error or exhausted retries.
            let text = response.text().await.unwrap_or_default();
            let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&text) {
                format!(
                    "OpenAI API error ({}): {}",
                    api_err.error.type_.as_deref().unwrap_or("error"),
                    api_err.error.message
                )
            } else {
                format!("API returned {status}: {text}")
            };
            return Err(endpoint.error(message, None));
        }

        Err(last_error
            .unwrap_or_else(|| endpoint.error("request failed after retries".into(), None)))
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WireMessage;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> OpenAiClient {
        OpenAiClient::new("test-api-key", base_url).unwrap()
    }

    fn chat_request() -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: "gpt-4o".into(),
            messages: vec![WireMessage {
                role: "user".into(),
                content: Some("Hello".into()),
                tool_calls: None,
                tool_call_id: None,
                name: None,
            }],
            max_tokens: 1024,
            tools: None,
        }
    }

    fn chat_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-test",
            "model": "gpt-4o",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        })
    }

    #[tokio::test]
    async fn chat_completion_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("Hi there!")))
            .mount(&server)
            .await;

        let result = test_client(&server.uri())
            .chat_completion(&chat_request())
            .await
            .unwrap();
        assert_eq!(result.id, "chatcmpl-test");
        assert_eq!(
            result.choices[0].message.content.as_deref(),
            Some("Hi there!")
        );
        assert_eq!(result.usage.prompt_tokens, 10);
    }

    #[tokio::test]
    async fn chat_completion_retries_on_429() {
        let server = MockServer::start().await;
        let error_body = serde_json::json!({
            "error": {"message": "Rate limited", "type": "rate_limit_error"}
        });

        // First request returns 429, second returns 200.
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(&error_body))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("After retry")))
            .mount(&server)
            .await;

        let result = test_client(&server.uri())
            .chat_completion(&chat_request())
            .await
            .unwrap();
        assert_eq!(
            result.choices[0].message.content.as_deref(),
            Some("After retry")
        );
    }

    #[tokio::test]
    async fn chat_completion_fails_on_400() {
        let server = MockServer::start().await;
        let error_body = serde_json::json!({
            "error": {"message": "Bad model", "type": "invalid_request_error"}
        });
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(&error_body))
            .mount(&server)
            .await;

        let result = test_client(&server.uri()).chat_completion(&chat_request()).await;
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid_request_error"), "got: {err}");
        assert!(err.contains("Bad model"), "got: {err}");
    }

    #[tokio::test]
    async fn chat_completion_exhausts_retries_on_503() {
        let server = MockServer::start().await;
        let error_body = serde_json::json!({
            "error": {"message": "Service overloaded", "type": "server_error"}
        });
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503).set_body_json(&error_body))
            .expect(2)
            .mount(&server)
            .await;

        let result = test_client(&server.uri()).chat_completion(&chat_request()).await;
        let err = result.unwrap_err().to_string();
        assert!(err.contains("server_error"), "got: {err}");
    }

    #[tokio::test]
    async fn client_sends_bearer_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-api-key"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("ok")))
            .mount(&server)
            .await;

        let result = test_client(&server.uri()).chat_completion(&chat_request()).await;
        assert!(result.is_ok(), "headers should match: {result:?}");
    }

    #[tokio::test]
    async fn embeddings_success_and_error_variant() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"index": 0, "embedding": [0.6, 0.8]}],
                "model": "text-embedding-3-small",
                "usage": {"prompt_tokens": 3, "total_tokens": 3}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client
            .embeddings(&EmbeddingsRequest {
                model: "text-embedding-3-small".into(),
                input: vec!["hello".into()],
                dimensions: Some(2),
            })
            .await
            .unwrap();
        assert_eq!(result.data[0].embedding, vec![0.6, 0.8]);
    }

    #[tokio::test]
    async fn embeddings_failure_maps_to_embedding_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"message": "bad input", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let result = test_client(&server.uri())
            .embeddings(&EmbeddingsRequest {
                model: "text-embedding-3-small".into(),
                input: vec!["hello".into()],
                dimensions: None,
            })
            .await;
        assert!(matches!(
            result,
            Err(WayfareError::Embedding { .. })
        ));
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_tolerated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("ok")))
            .mount(&server)
            .await;

        let client = test_client(&format!("{}/", server.uri()));
        assert!(client.chat_completion(&chat_request()).await.is_ok());
    }
}
