// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed memory store with vector BLOB storage.

use std::str::FromStr;

use tokio_rusqlite::Connection;

use wayfare_core::{MemoryType, WayfareError};

use crate::types::{blob_to_vec, vec_to_blob, MemoryRecord, MemoryScope};

/// Helper to convert tokio_rusqlite errors into WayfareError::Storage.
fn storage_err(e: tokio_rusqlite::Error) -> WayfareError {
    WayfareError::Storage {
        source: Box::new(e),
    }
}

/// Persistent store for memory records in SQLite.
///
/// Stores embeddings as little-endian f32 BLOBs. Similarity scoring happens
/// in process over scoped embedding scans; the store only filters by scope.
pub struct MemoryStore {
    conn: Connection,
}

impl MemoryStore {
    /// Creates a new MemoryStore wrapping an existing connection.
    ///
    /// The connection must already have the memories migration applied.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Insert a memory record.
    pub async fn insert(&self, record: &MemoryRecord) -> Result<(), WayfareError> {
        let memory_id = record.memory_id.clone();
        let content = record.content.clone();
        let embedding_blob = vec_to_blob(&record.embedding);
        let memory_type = record.memory_type.to_string();
        let user_id = record.user_id.clone();
        let thread_id = record.thread_id.clone();
        let metadata = record.metadata.clone();
        let created_at = record.created_at.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO memories (memory_id, content, embedding, memory_type, user_id, thread_id, metadata, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    rusqlite::params![
                        memory_id,
                        content,
                        embedding_blob,
                        memory_type,
                        user_id,
                        thread_id,
                        metadata,
                        created_at,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(storage_err)
    }

    /// Get embeddings within a scope (lightweight -- no content).
    ///
    /// Returns (memory_id, embedding) pairs for in-process similarity scoring.
    pub async fn embeddings_in_scope(
        &self,
        scope: &MemoryScope,
    ) -> Result<Vec<(String, Vec<f32>)>, WayfareError> {
        let (sql, params) = scope_query("SELECT memory_id, embedding FROM memories", scope);

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql)?;
                let param_refs: Vec<&dyn rusqlite::types::ToSql> =
                    params.iter().map(|p| p as &dyn rusqlite::types::ToSql).collect();
                let results = stmt
                    .query_map(param_refs.as_slice(), |row| {
                        let id: String = row.get(0)?;
                        let blob: Vec<u8> = row.get(1)?;
                        Ok((id, blob_to_vec(&blob)))
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(results)
            })
            .await
            .map_err(storage_err)
    }

    /// Get full records by id.
    ///
    /// Rows that fail to decode are dropped individually rather than
    /// failing the whole batch. Result order follows the input ids.
    pub async fn get_by_ids(&self, ids: &[String]) -> Result<Vec<MemoryRecord>, WayfareError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let ids = ids.to_vec();
        let fetched: Vec<MemoryRecord> = self
            .conn
            .call(move |conn| {
                let placeholders: Vec<String> =
                    (1..=ids.len()).map(|i| format!("?{i}")).collect();
                let sql = format!(
                    "SELECT memory_id, content, embedding, memory_type, user_id, thread_id, metadata, created_at
                     FROM memories WHERE memory_id IN ({})",
                    placeholders.join(", ")
                );
                let mut stmt = conn.prepare(&sql)?;

                let params: Vec<&dyn rusqlite::types::ToSql> =
                    ids.iter().map(|id| id as &dyn rusqlite::types::ToSql).collect();
                let records = stmt
                    .query_map(params.as_slice(), row_to_record)?
                    .filter_map(|r| r.ok().flatten())
                    .collect::<Vec<_>>();

                // Preserve the caller's id order (typically distance order).
                let mut ordered = Vec::with_capacity(records.len());
                for id in &ids {
                    if let Some(record) = records.iter().find(|r| &r.memory_id == id) {
                        ordered.push(record.clone());
                    }
                }
                Ok(ordered)
            })
            .await
            .map_err(storage_err)?;

        Ok(fetched)
    }
}

/// Build a scoped SELECT with positional parameters.
fn scope_query(base: &str, scope: &MemoryScope) -> (String, Vec<String>) {
    let mut sql = format!("{base} WHERE user_id = ?1");
    let mut params = vec![scope.user_id.clone()];

    if !scope.memory_types.is_empty() {
        let placeholders: Vec<String> = scope
            .memory_types
            .iter()
            .map(|mt| {
                params.push(mt.to_string());
                format!("?{}", params.len())
            })
            .collect();
        sql.push_str(&format!(" AND memory_type IN ({})", placeholders.join(", ")));
    }

    if let Some(thread_id) = &scope.thread_id {
        params.push(thread_id.clone());
        sql.push_str(&format!(" AND thread_id = ?{}", params.len()));
    }

    (sql, params)
}

/// Convert a rusqlite Row to a MemoryRecord.
///
/// Returns `Ok(None)` for rows with an unrecognized memory_type so the
/// caller can drop them without aborting the batch.
fn row_to_record(row: &rusqlite::Row) -> Result<Option<MemoryRecord>, rusqlite::Error> {
    let embedding_blob: Vec<u8> = row.get(2)?;
    let memory_type_str: String = row.get(3)?;
    let Ok(memory_type) = MemoryType::from_str(&memory_type_str) else {
        return Ok(None);
    };

    Ok(Some(MemoryRecord {
        memory_id: row.get(0)?,
        content: row.get(1)?,
        embedding: blob_to_vec(&embedding_blob),
        memory_type,
        user_id: row.get(4)?,
        thread_id: row.get(5)?,
        metadata: row.get(6)?,
        created_at: row.get(7)?,
    }))
}
