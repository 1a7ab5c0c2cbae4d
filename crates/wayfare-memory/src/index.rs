// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deduplicating vector memory index.
//!
//! Writes embed the content, check the scope for a near-duplicate, and
//! skip the insert when one exists. Reads embed the query and return only
//! records within the retrieval distance threshold, nearest first.

use std::sync::Arc;

use tracing::{debug, warn};

use wayfare_config::model::MemoryConfig;
use wayfare_core::{EmbeddingAdapter, EmbeddingInput, MemoryType, WayfareError};

use crate::store::MemoryStore;
use crate::types::{cosine_distance, MemoryRecord, MemoryScope, SYSTEM_USER_ID};

/// Long-term memory index over a [`MemoryStore`] and an embedding adapter.
pub struct MemoryIndex {
    store: Arc<MemoryStore>,
    embedder: Arc<dyn EmbeddingAdapter>,
    config: MemoryConfig,
}

impl MemoryIndex {
    pub fn new(
        store: Arc<MemoryStore>,
        embedder: Arc<dyn EmbeddingAdapter>,
        config: MemoryConfig,
    ) -> Self {
        Self {
            store,
            embedder,
            config,
        }
    }

    /// Store a memory unless a near-duplicate already exists in the scope.
    ///
    /// Duplicate writes are silently skipped. Insert failures are logged
    /// and swallowed so a lost memory never fails the surrounding turn;
    /// embedding and scan failures propagate to the caller.
    pub async fn store(
        &self,
        content: &str,
        memory_type: MemoryType,
        user_id: Option<&str>,
        thread_id: Option<&str>,
        metadata: Option<String>,
    ) -> Result<(), WayfareError> {
        let user_id = user_id.unwrap_or(SYSTEM_USER_ID);
        let embedding = self.embed_one(content).await?;

        let scope = MemoryScope {
            user_id: user_id.to_string(),
            memory_types: vec![memory_type],
            thread_id: thread_id.map(str::to_string),
        };
        if self.similar_memory_exists(&embedding, &scope).await? {
            debug!(%user_id, %memory_type, "near-duplicate memory, skipping write");
            return Ok(());
        }

        let record = MemoryRecord {
            memory_id: uuid::Uuid::new_v4().to_string(),
            content: content.to_string(),
            embedding,
            memory_type,
            user_id: user_id.to_string(),
            thread_id: thread_id.map(str::to_string),
            metadata: metadata.unwrap_or_else(|| "{}".to_string()),
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        if let Err(e) = self.store.insert(&record).await {
            warn!(error = %e, %user_id, "memory write failed, dropping record");
        }
        Ok(())
    }

    /// Retrieve memories relevant to `query`, nearest first.
    ///
    /// Only records within the distance threshold are returned, capped at
    /// `limit`. Both default to the configured values when not given per
    /// call. Records that fail to decode are dropped individually.
    pub async fn retrieve(
        &self,
        query: &str,
        memory_types: Vec<MemoryType>,
        user_id: Option<&str>,
        thread_id: Option<&str>,
        limit: Option<usize>,
        distance_threshold: Option<f32>,
    ) -> Result<Vec<MemoryRecord>, WayfareError> {
        let user_id = user_id.unwrap_or(SYSTEM_USER_ID);
        let limit = limit.unwrap_or(self.config.retrieval_limit);
        let threshold = distance_threshold.unwrap_or(self.config.retrieval_distance);
        let query_embedding = self.embed_one(query).await?;

        let scope = MemoryScope {
            user_id: user_id.to_string(),
            memory_types,
            thread_id: thread_id.map(str::to_string),
        };
        let candidates = self.store.embeddings_in_scope(&scope).await?;

        let mut scored: Vec<(String, f32)> = candidates
            .into_iter()
            .filter_map(|(id, embedding)| {
                if embedding.len() != query_embedding.len() {
                    warn!(memory_id = %id, "embedding dimension mismatch, skipping");
                    return None;
                }
                let distance = cosine_distance(&query_embedding, &embedding);
                (distance <= threshold).then_some((id, distance))
            })
            .collect();

        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);

        let ids: Vec<String> = scored.into_iter().map(|(id, _)| id).collect();
        self.store.get_by_ids(&ids).await
    }

    /// True if any memory in the scope is within the dedup distance.
    async fn similar_memory_exists(
        &self,
        embedding: &[f32],
        scope: &MemoryScope,
    ) -> Result<bool, WayfareError> {
        let candidates = self.store.embeddings_in_scope(scope).await?;
        Ok(candidates.iter().any(|(_, existing)| {
            existing.len() == embedding.len()
                && cosine_distance(embedding, existing) <= self.config.dedup_distance
        }))
    }

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, WayfareError> {
        let output = self
            .embedder
            .embed(EmbeddingInput {
                texts: vec![text.to_string()],
            })
            .await?;
        output
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| WayfareError::Embedding {
                message: "embedding service returned no vectors".to_string(),
                source: None,
            })
    }
}
