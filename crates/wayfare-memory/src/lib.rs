// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Long-term memory for the Wayfare assistant.
//!
//! Memories are embedded, stored in SQLite with BLOB vectors, deduplicated
//! on write by cosine distance, and retrieved through a distance-thresholded
//! nearest-first scan. Two model-facing tools expose the index to the
//! conversation loop.

pub mod index;
pub mod store;
pub mod tools;
pub mod types;

pub use index::MemoryIndex;
pub use store::MemoryStore;
pub use tools::{RetrieveMemoriesTool, StoreMemoryTool};
pub use types::{MemoryRecord, MemoryScope, SYSTEM_USER_ID};
