// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding adapter backed by the embeddings endpoint.

use async_trait::async_trait;

use wayfare_config::model::OpenAiConfig;
use wayfare_core::{
    AdapterType, EmbeddingAdapter, EmbeddingInput, EmbeddingOutput, HealthStatus, PluginAdapter,
    WayfareError,
};

use crate::client::OpenAiClient;
use crate::types::EmbeddingsRequest;

/// Embedding adapter for OpenAI-compatible embedding APIs.
pub struct OpenAiEmbedding {
    client: OpenAiClient,
    model: String,
    dimensions: usize,
}

impl OpenAiEmbedding {
    pub fn new(config: &OpenAiConfig) -> Result<Self, WayfareError> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| WayfareError::Config("openai.api_key is required".to_string()))?;
        Ok(Self {
            client: OpenAiClient::new(api_key, config.base_url.clone())?,
            model: config.embedding_model.clone(),
            dimensions: config.embedding_dimensions,
        })
    }
}

#[async_trait]
impl PluginAdapter for OpenAiEmbedding {
    fn name(&self) -> &str {
        "openai-embedding"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Embedding
    }

    async fn health_check(&self) -> Result<HealthStatus, WayfareError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), WayfareError> {
        Ok(())
    }
}

#[async_trait]
impl EmbeddingAdapter for OpenAiEmbedding {
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, WayfareError> {
        if input.texts.is_empty() {
            return Ok(EmbeddingOutput {
                embeddings: Vec::new(),
                dimensions: self.dimensions,
            });
        }

        let request = EmbeddingsRequest {
            model: self.model.clone(),
            input: input.texts,
            dimensions: Some(self.dimensions),
        };
        let response = self.client.embeddings(&request).await?;

        // The API may return entries out of order; index is authoritative.
        let mut data = response.data;
        data.sort_by_key(|d| d.index);

        for entry in &data {
            if entry.embedding.len() != self.dimensions {
                return Err(WayfareError::Embedding {
                    message: format!(
                        "expected {} dimensions, API returned {}",
                        self.dimensions,
                        entry.embedding.len()
                    ),
                    source: None,
                });
            }
        }

        Ok(EmbeddingOutput {
            embeddings: data.into_iter().map(|d| d.embedding).collect(),
            dimensions: self.dimensions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str) -> OpenAiConfig {
        OpenAiConfig {
            api_key: Some("test-api-key".to_string()),
            base_url: base_url.to_string(),
            embedding_dimensions: 3,
            ..Default::default()
        }
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let config = OpenAiConfig {
            api_key: None,
            ..Default::default()
        };
        assert!(matches!(
            OpenAiEmbedding::new(&config),
            Err(WayfareError::Config(_))
        ));
    }

    #[tokio::test]
    async fn embed_requests_configured_model_and_dimensions() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .and(body_partial_json(serde_json::json!({
                "model": "text-embedding-3-small",
                "dimensions": 3
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"index": 0, "embedding": [0.6, 0.8, 0.0]}],
                "model": "text-embedding-3-small",
                "usage": {"prompt_tokens": 3, "total_tokens": 3}
            })))
            .mount(&server)
            .await;

        let adapter = OpenAiEmbedding::new(&test_config(&server.uri())).unwrap();
        let output = adapter
            .embed(EmbeddingInput {
                texts: vec!["prefers window seats".into()],
            })
            .await
            .unwrap();
        assert_eq!(output.dimensions, 3);
        assert_eq!(output.embeddings, vec![vec![0.6, 0.8, 0.0]]);
    }

    #[tokio::test]
    async fn embed_reorders_by_index() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"index": 1, "embedding": [0.0, 1.0, 0.0]},
                    {"index": 0, "embedding": [1.0, 0.0, 0.0]}
                ],
                "model": "text-embedding-3-small",
                "usage": {"prompt_tokens": 6, "total_tokens": 6}
            })))
            .mount(&server)
            .await;

        let adapter = OpenAiEmbedding::new(&test_config(&server.uri())).unwrap();
        let output = adapter
            .embed(EmbeddingInput {
                texts: vec!["one".into(), "two".into()],
            })
            .await
            .unwrap();
        assert_eq!(output.embeddings[0], vec![1.0, 0.0, 0.0]);
        assert_eq!(output.embeddings[1], vec![0.0, 1.0, 0.0]);
    }

    #[tokio::test]
    async fn dimension_mismatch_is_rejected() {
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

        let adapter = OpenAiEmbedding::new(&test_config(&server.uri())).unwrap();
        let result = adapter
            .embed(EmbeddingInput {
                texts: vec!["hello".into()],
            })
            .await;
        assert!(matches!(result, Err(WayfareError::Embedding { .. })));
    }

    #[tokio::test]
    async fn empty_input_short_circuits() {
        // No server mounted; an HTTP call would fail.
        let adapter = OpenAiEmbedding::new(&test_config("http://127.0.0.1:1")).unwrap();
        let output = adapter.embed(EmbeddingInput { texts: vec![] }).await.unwrap();
        assert!(output.embeddings.is_empty());
    }
}
