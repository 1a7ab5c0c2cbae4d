// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool registry.
//!
//! Holds the tools offered to the generation service for a session and
//! renders their definitions in the provider wire format.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;

use wayfare_core::Tool;

/// Registered tools, keyed by name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registers a tool. A tool registered under an existing name replaces it.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Tool definitions in the provider wire format, sorted by name so the
    /// request payload is stable across runs.
    pub fn definitions(&self) -> Vec<serde_json::Value> {
        let mut names: Vec<&String> = self.tools.keys().collect();
        names.sort();
        names
            .into_iter()
            .map(|name| {
                let tool = &self.tools[name];
                json!({
                    "type": "function",
                    "function": {
                        "name": tool.name(),
                        "description": tool.description(),
                        "parameters": tool.parameters_schema(),
                    }
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use wayfare_core::{ToolContext, ToolOutput, WayfareError};

    struct NamedTool(&'static str);

    #[async_trait]
    impl Tool for NamedTool {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "a test tool"
        }

        fn parameters_schema(&self) -> serde_json::Value {
            json!({"type": "object", "properties": {}})
        }

        async fn invoke(
            &self,
            _args: serde_json::Value,
            _ctx: &ToolContext,
        ) -> Result<ToolOutput, WayfareError> {
            Ok(ToolOutput::ok("ok"))
        }
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());
        registry.register(Arc::new(NamedTool("store_memory")));
        assert_eq!(registry.len(), 1);
        assert!(registry.get("store_memory").is_some());
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn definitions_use_wire_format_sorted_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(NamedTool("retrieve_memories")));
        registry.register(Arc::new(NamedTool("store_memory")));

        let defs = registry.definitions();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0]["type"], "function");
        assert_eq!(defs[0]["function"]["name"], "retrieve_memories");
        assert_eq!(defs[1]["function"]["name"], "store_memory");
        assert!(defs[0]["function"]["parameters"].is_object());
    }
}
