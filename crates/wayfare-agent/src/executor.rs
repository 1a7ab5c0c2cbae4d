// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concurrent tool execution.
//!
//! All calls from one assistant message run concurrently, but the result
//! messages come back in call order. A failing call never aborts its
//! siblings; the failure becomes an error-text tool result tagged with the
//! originating call id so the generation service can see what went wrong.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};

use wayfare_core::{Message, ToolCall, ToolContext, ToolOutput, WayfareError};

use crate::registry::ToolRegistry;

/// Runs the tool calls requested by an assistant message.
pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
    timeout: Duration,
}

impl ToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    /// Executes every call concurrently and returns one tool-result message
    /// per call, in the same order as the input slice.
    pub async fn execute_all(&self, calls: &[ToolCall], ctx: &ToolContext) -> Vec<Message> {
        join_all(calls.iter().map(|call| self.execute_one(call, ctx))).await
    }

    async fn execute_one(&self, call: &ToolCall, ctx: &ToolContext) -> Message {
        debug!(tool = call.name.as_str(), call_id = call.id.as_str(), "executing tool call");
        let content = match self.run_tool(call, ctx).await {
            Ok(output) => output.content,
            Err(e) => {
                warn!(tool = call.name.as_str(), error = %e, "tool call failed");
                format!("Error executing tool '{}': {e}", call.name)
            }
        };
        Message::tool_result(call.id.clone(), call.name.clone(), content)
    }

    async fn run_tool(
        &self,
        call: &ToolCall,
        ctx: &ToolContext,
    ) -> Result<ToolOutput, WayfareError> {
        let tool = self
            .registry
            .get(&call.name)
            .ok_or_else(|| WayfareError::ToolNotFound {
                name: call.name.clone(),
            })?;
        match tokio::time::timeout(self.timeout, tool.invoke(call.args.clone(), ctx)).await {
            Ok(result) => result,
            Err(_) => Err(WayfareError::Timeout {
                duration: self.timeout,
            }),
        }
    }
}
