// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Checkpoint upsert and load operations.

use rusqlite::params;

use wayfare_core::{ConversationState, WayfareError};

use crate::database::{map_tr_err, Database};

/// Save a conversation snapshot, replacing any prior snapshot for the thread.
///
/// The version counter increments on every replacement so the row records
/// how many snapshots a thread has gone through.
pub async fn upsert_checkpoint(
    db: &Database,
    state: &ConversationState,
) -> Result<(), WayfareError> {
    let thread_id = state.thread_id.clone();
    let state_json = serde_json::to_string(state).map_err(|e| WayfareError::Storage {
        source: Box::new(e),
    })?;

    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO checkpoints (thread_id, version, state, updated_at)
                 VALUES (?1, 1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                 ON CONFLICT(thread_id) DO UPDATE SET
                     version = version + 1,
                     state = excluded.state,
                     updated_at = excluded.updated_at",
                params![thread_id, state_json],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Load the most recent snapshot for a thread, or `None` if never saved.
pub async fn get_checkpoint(
    db: &Database,
    thread_id: &str,
) -> Result<Option<ConversationState>, WayfareError> {
    let thread_id = thread_id.to_string();
    let state_json: Option<String> = db
        .connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare("SELECT state FROM checkpoints WHERE thread_id = ?1")?;
            let mut rows = stmt.query(params![thread_id])?;
            match rows.next()? {
                Some(row) => Ok(Some(row.get(0)?)),
                None => Ok(None),
            }
        })
        .await
        .map_err(map_tr_err)?;

    match state_json {
        Some(json) => {
            let state = serde_json::from_str(&json).map_err(|e| WayfareError::Storage {
                source: Box::new(e),
            })?;
            Ok(Some(state))
        }
        None => Ok(None),
    }
}

/// Current version counter for a thread's checkpoint row.
pub async fn get_checkpoint_version(
    db: &Database,
    thread_id: &str,
) -> Result<Option<i64>, WayfareError> {
    let thread_id = thread_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare("SELECT version FROM checkpoints WHERE thread_id = ?1")?;
            let mut rows = stmt.query(params![thread_id])?;
            match rows.next()? {
                Some(row) => Ok(Some(row.get(0)?)),
                None => Ok(None),
            }
        })
        .await
        .map_err(map_tr_err)
}
