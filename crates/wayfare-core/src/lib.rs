// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Wayfare assistant.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Wayfare workspace. All adapter plugins
//! implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::WayfareError;
pub use types::{
    AdapterType, ConversationState, EmbeddingInput, EmbeddingOutput, GenerationRequest,
    HealthStatus, MemoryType, Message, Role, ToolCall,
};

// Re-export all adapter traits at crate root.
pub use traits::{
    CheckpointStore, EmbeddingAdapter, GenerationAdapter, PluginAdapter, StorageAdapter, Tool,
    ToolContext, ToolOutput,
};
