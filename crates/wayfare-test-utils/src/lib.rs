// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared test doubles for the Wayfare workspace.
//!
//! These mocks implement the core adapter traits with deterministic,
//! in-process behavior so crate tests never touch the network.

pub mod memory_checkpoint;
pub mod mock_embedder;
pub mod mock_generation;

pub use memory_checkpoint::MemoryCheckpointStore;
pub use mock_embedder::MockEmbedder;
pub use mock_generation::MockGeneration;
