// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Checkpoint store trait for conversation persistence across turns.

use async_trait::async_trait;

use crate::error::WayfareError;
use crate::types::ConversationState;

/// Persists conversation state between turns, keyed by thread id.
///
/// Each `save` supersedes the prior snapshot for the same thread. `load`
/// returns the most recent snapshot, or `None` for a thread that has
/// never been saved.
#[async_trait]
pub trait CheckpointStore: Send + Sync + 'static {
    /// Saves a snapshot of the conversation, replacing any prior snapshot
    /// for the same thread.
    async fn save(&self, state: &ConversationState) -> Result<(), WayfareError>;

    /// Loads the most recent snapshot for the given thread.
    async fn load(&self, thread_id: &str) -> Result<Option<ConversationState>, WayfareError>;
}
