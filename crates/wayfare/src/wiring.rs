// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assembly of the assistant stack from configuration.
//!
//! Storage opens first; the memory index shares its database connection.
//! Memory tools are only registered when `memory.enabled` is set.

use std::sync::Arc;

use tracing::info;

use wayfare_agent::{Agent, ToolRegistry};
use wayfare_config::model::WayfareConfig;
use wayfare_core::{EmbeddingAdapter, GenerationAdapter, StorageAdapter, WayfareError};
use wayfare_memory::{MemoryIndex, MemoryStore, RetrieveMemoriesTool, StoreMemoryTool};
use wayfare_openai::{OpenAiEmbedding, OpenAiGeneration};
use wayfare_storage::SqliteStorage;

/// The assembled assistant and the storage it checkpoints to.
pub struct AssistantStack {
    pub agent: Agent,
    pub storage: Arc<SqliteStorage>,
}

/// Builds the full stack: storage, adapters, memory tools, agent.
pub async fn build_stack(config: &WayfareConfig) -> Result<AssistantStack, WayfareError> {
    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;

    let generation: Arc<dyn GenerationAdapter> = Arc::new(OpenAiGeneration::new(&config.openai)?);

    let mut registry = ToolRegistry::new();
    if config.memory.enabled {
        let embedder: Arc<dyn EmbeddingAdapter> = Arc::new(OpenAiEmbedding::new(&config.openai)?);
        let store = Arc::new(MemoryStore::new(storage.connection()?));
        let index = Arc::new(MemoryIndex::new(store, embedder, config.memory.clone()));
        registry.register(Arc::new(StoreMemoryTool::new(index.clone())));
        registry.register(Arc::new(RetrieveMemoriesTool::new(index)));
        info!("long-term memory enabled");
    } else {
        info!("long-term memory disabled by configuration");
    }

    let agent = Agent::new(config, generation, storage.clone(), Arc::new(registry)).await?;

    Ok(AssistantStack { agent, storage })
}
