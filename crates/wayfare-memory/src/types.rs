// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory domain types for the long-term memory index.

use serde::{Deserialize, Serialize};

use wayfare_core::MemoryType;

/// Owner id used when no user identity is supplied.
pub const SYSTEM_USER_ID: &str = "system";

/// A single long-term memory record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Unique identifier for this memory.
    pub memory_id: String,
    /// The factual content of this memory.
    pub content: String,
    /// Embedding vector for semantic search (384-dim).
    #[serde(skip)]
    pub embedding: Vec<f32>,
    /// Category this memory belongs to.
    pub memory_type: MemoryType,
    /// Owner of this memory.
    pub user_id: String,
    /// Conversation this memory was captured in, if thread-scoped.
    pub thread_id: Option<String>,
    /// Opaque metadata JSON, `{}` when none supplied.
    pub metadata: String,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
}

/// Scope filters applied to memory reads.
///
/// `user_id` is always required; `memory_types` and `thread_id` narrow the
/// result set only when present, matching write-side scoping.
#[derive(Debug, Clone)]
pub struct MemoryScope {
    pub user_id: String,
    pub memory_types: Vec<MemoryType>,
    pub thread_id: Option<String>,
}

impl MemoryScope {
    /// Scope containing every memory owned by `user_id`.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            memory_types: Vec::new(),
            thread_id: None,
        }
    }
}

/// Convert f32 vector to bytes for SQLite BLOB storage.
pub fn vec_to_blob(vec: &[f32]) -> Vec<u8> {
    vec.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert SQLite BLOB back to f32 vector.
pub fn blob_to_vec(blob: &[u8]) -> Vec<f32> {
    blob.chunks_exact(4)
        .map(|chunk| f32::from_le_bytes(chunk.try_into().unwrap()))
        .collect()
}

/// Compute cosine similarity between two vectors.
///
/// For L2-normalized vectors (as output by embedding services),
/// this is equivalent to the dot product.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "vectors must have same length");
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Cosine distance: 0.0 for identical direction, up to 2.0 for opposite.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    1.0 - cosine_similarity(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_to_blob_roundtrip() {
        let original = vec![0.1_f32, 0.2, 0.3, -0.5, 1.0];
        let blob = vec_to_blob(&original);
        let recovered = blob_to_vec(&blob);
        assert_eq!(original.len(), recovered.len());
        for (a, b) in original.iter().zip(recovered.iter()) {
            assert!((a - b).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn vec_to_blob_384_dim() {
        let vec384: Vec<f32> = (0..384).map(|i| i as f32 / 384.0).collect();
        let blob = vec_to_blob(&vec384);
        assert_eq!(blob.len(), 384 * 4); // 1536 bytes
        let recovered = blob_to_vec(&blob);
        assert_eq!(recovered.len(), 384);
    }

    #[test]
    fn cosine_distance_identical_is_zero() {
        let v: Vec<f32> = vec![0.5773, 0.5773, 0.5773]; // ~1/sqrt(3) each
        let dist = cosine_distance(&v, &v);
        assert!(dist.abs() < 0.01, "identical vectors should have distance ~0, got {dist}");
    }

    #[test]
    fn cosine_distance_orthogonal_is_one() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        let dist = cosine_distance(&a, &b);
        assert!((dist - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn cosine_distance_opposite_is_two() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        let dist = cosine_distance(&a, &b);
        assert!((dist - 2.0).abs() < f32::EPSILON);
    }
}
