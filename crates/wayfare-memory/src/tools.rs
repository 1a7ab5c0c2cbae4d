// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model-facing memory tools.
//!
//! Failures surface as error-flagged tool output rather than `Err`, so the
//! generation service sees what went wrong and can tell the user.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use wayfare_core::{MemoryType, Tool, ToolContext, ToolOutput, WayfareError};

use crate::index::MemoryIndex;

/// Stores a long-term memory on behalf of the model.
pub struct StoreMemoryTool {
    index: Arc<MemoryIndex>,
}

impl StoreMemoryTool {
    pub fn new(index: Arc<MemoryIndex>) -> Self {
        Self { index }
    }
}

#[derive(Debug, Deserialize)]
struct StoreMemoryArgs {
    content: String,
    memory_type: MemoryType,
    #[serde(default)]
    metadata: Option<String>,
}

#[async_trait]
impl Tool for StoreMemoryTool {
    fn name(&self) -> &str {
        "store_memory"
    }

    fn description(&self) -> &str {
        "Store a long-term memory in the system. Use this tool to save important \
         information about user preferences, experiences, or general knowledge that \
         might be useful in future interactions."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "content": {
                    "type": "string",
                    "description": "The memory content as a standalone statement"
                },
                "memory_type": {
                    "type": "string",
                    "enum": ["episodic", "semantic"],
                    "description": "episodic for user preferences and experiences, semantic for general knowledge"
                },
                "metadata": {
                    "type": "string",
                    "description": "Optional metadata to attach to the memory"
                }
            },
            "required": ["content", "memory_type"]
        })
    }

    async fn invoke(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext,
    ) -> Result<ToolOutput, WayfareError> {
        let args: StoreMemoryArgs = match serde_json::from_value(args) {
            Ok(args) => args,
            Err(e) => return Ok(ToolOutput::error(format!("Error storing memory: {e}"))),
        };

        // Memories are user-global: no thread filter, so the duplicate
        // check spans threads and retrieval from any thread sees them.
        match self
            .index
            .store(
                &args.content,
                args.memory_type,
                Some(&ctx.user_id),
                None,
                args.metadata,
            )
            .await
        {
            Ok(()) => Ok(ToolOutput::ok(format!(
                "Successfully stored {} memory: {}",
                args.memory_type, args.content
            ))),
            Err(e) => Ok(ToolOutput::error(format!("Error storing memory: {e}"))),
        }
    }
}

/// Retrieves long-term memories relevant to a query.
pub struct RetrieveMemoriesTool {
    index: Arc<MemoryIndex>,
}

impl RetrieveMemoriesTool {
    pub fn new(index: Arc<MemoryIndex>) -> Self {
        Self { index }
    }
}

#[derive(Debug, Deserialize)]
struct RetrieveMemoriesArgs {
    query: String,
    #[serde(default)]
    memory_types: Vec<MemoryType>,
    #[serde(default)]
    limit: Option<usize>,
}

#[async_trait]
impl Tool for RetrieveMemoriesTool {
    fn name(&self) -> &str {
        "retrieve_memories"
    }

    fn description(&self) -> &str {
        "Retrieve long-term memories relevant to the query. Use this tool to access \
         previously stored information about user preferences, experiences, or \
         general knowledge."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "What to search the memory index for"
                },
                "memory_types": {
                    "type": "array",
                    "items": { "type": "string", "enum": ["episodic", "semantic"] },
                    "description": "Restrict results to these memory types; omit for all"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of memories to return"
                }
            },
            "required": ["query"]
        })
    }

    async fn invoke(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext,
    ) -> Result<ToolOutput, WayfareError> {
        let args: RetrieveMemoriesArgs = match serde_json::from_value(args) {
            Ok(args) => args,
            Err(e) => return Ok(ToolOutput::error(format!("Error retrieving memories: {e}"))),
        };

        match self
            .index
            .retrieve(
                &args.query,
                args.memory_types,
                Some(&ctx.user_id),
                None,
                args.limit,
                None,
            )
            .await
        {
            Ok(memories) => Ok(ToolOutput::ok(format_memories(&memories))),
            Err(e) => Ok(ToolOutput::error(format!("Error retrieving memories: {e}"))),
        }
    }
}

/// Render retrieved memories for the model.
fn format_memories(memories: &[crate::types::MemoryRecord]) -> String {
    if memories.is_empty() {
        return "No relevant memories found.".to_string();
    }
    let mut responses = vec!["Long-term memories:".to_string()];
    for memory in memories {
        responses.push(format!("- [{}] {}", memory.memory_type, memory.content));
    }
    responses.join(" ")
}
