// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory checkpoint store for tests that do not need SQLite.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use wayfare_core::{CheckpointStore, ConversationState, WayfareError};

/// A `CheckpointStore` backed by a process-local map.
pub struct MemoryCheckpointStore {
    states: Mutex<HashMap<String, ConversationState>>,
}

impl MemoryCheckpointStore {
    pub fn new() -> Self {
        Self {
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Number of distinct threads with a saved checkpoint.
    pub async fn thread_count(&self) -> usize {
        self.states.lock().await.len()
    }
}

impl Default for MemoryCheckpointStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CheckpointStore for MemoryCheckpointStore {
    async fn save(&self, state: &ConversationState) -> Result<(), WayfareError> {
        self.states
            .lock()
            .await
            .insert(state.thread_id.clone(), state.clone());
        Ok(())
    }

    async fn load(&self, thread_id: &str) -> Result<Option<ConversationState>, WayfareError> {
        Ok(self.states.lock().await.get(thread_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfare_core::Message;

    #[tokio::test]
    async fn load_unknown_thread_returns_none() {
        let store = MemoryCheckpointStore::new();
        assert!(store.load("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = MemoryCheckpointStore::new();
        let mut state = ConversationState::new("thread-1");
        state.push(Message::user("hello"));
        store.save(&state).await.unwrap();

        let loaded = store.load("thread-1").await.unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn save_supersedes_previous_checkpoint() {
        let store = MemoryCheckpointStore::new();
        let mut state = ConversationState::new("thread-1");
        state.push(Message::user("first"));
        store.save(&state).await.unwrap();
        state.push(Message::assistant("second"));
        store.save(&state).await.unwrap();

        let loaded = store.load("thread-1").await.unwrap().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(store.thread_count().await, 1);
    }
}
