// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the Wayfare plugin architecture.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod checkpoint;
pub mod embedding;
pub mod generation;
pub mod storage;
pub mod tool;

// Re-export all traits at the traits module level for convenience.
pub use adapter::PluginAdapter;
pub use checkpoint::CheckpointStore;
pub use embedding::EmbeddingAdapter;
pub use generation::GenerationAdapter;
pub use storage::StorageAdapter;
pub use tool::{Tool, ToolContext, ToolOutput};
