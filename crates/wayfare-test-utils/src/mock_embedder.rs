// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic mock embedding adapter.
//!
//! Vectors are derived from a hash of the input text, so equal inputs always
//! embed to the identical vector (cosine distance zero) and distinct inputs
//! land far apart with overwhelming probability.

use std::hash::{DefaultHasher, Hash, Hasher};

use async_trait::async_trait;

use wayfare_core::{
    AdapterType, EmbeddingAdapter, EmbeddingInput, EmbeddingOutput, HealthStatus, PluginAdapter,
    WayfareError,
};

/// An embedding service that hashes text into unit-length vectors.
pub struct MockEmbedder {
    dimensions: usize,
}

impl MockEmbedder {
    /// Create a mock producing 384-dimensional vectors.
    pub fn new() -> Self {
        Self { dimensions: 384 }
    }

    /// Create a mock producing vectors of the given dimensionality.
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let mut state = hasher.finish() | 1;

        // xorshift over the text hash gives a stable pseudo-random vector.
        let mut vector = Vec::with_capacity(self.dimensions);
        for _ in 0..self.dimensions {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            vector.push((state as i64 as f32) / (i64::MAX as f32));
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockEmbedder {
    fn name(&self) -> &str {
        "mock-embedder"
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
impl EmbeddingAdapter for MockEmbedder {
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, WayfareError> {
        let embeddings = input.texts.iter().map(|t| self.embed_text(t)).collect();
        Ok(EmbeddingOutput {
            embeddings,
            dimensions: self.dimensions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn embed_one(embedder: &MockEmbedder, text: &str) -> Vec<f32> {
        let output = embedder
            .embed(EmbeddingInput {
                texts: vec![text.to_string()],
            })
            .await
            .unwrap();
        output.embeddings.into_iter().next().unwrap()
    }

    #[tokio::test]
    async fn equal_text_embeds_identically() {
        let embedder = MockEmbedder::new();
        let a = embed_one(&embedder, "prefers window seats").await;
        let b = embed_one(&embedder, "prefers window seats").await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn distinct_text_embeds_differently() {
        let embedder = MockEmbedder::new();
        let a = embed_one(&embedder, "prefers window seats").await;
        let b = embed_one(&embedder, "allergic to peanuts").await;
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn vectors_are_unit_length() {
        let embedder = MockEmbedder::new();
        let v = embed_one(&embedder, "some text").await;
        assert_eq!(v.len(), 384);
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn dimensionality_is_configurable() {
        let embedder = MockEmbedder::with_dimensions(8);
        let v = embed_one(&embedder, "short").await;
        assert_eq!(v.len(), 8);
    }

    #[tokio::test]
    async fn batches_preserve_input_order() {
        let embedder = MockEmbedder::new();
        let output = embedder
            .embed(EmbeddingInput {
                texts: vec!["one".to_string(), "two".to_string()],
            })
            .await
            .unwrap();
        assert_eq!(output.embeddings.len(), 2);
        assert_eq!(output.embeddings[0], embed_one(&embedder, "one").await);
        assert_eq!(output.embeddings[1], embed_one(&embedder, "two").await);
    }
}
