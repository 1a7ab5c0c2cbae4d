// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool trait for capabilities the assistant can invoke mid-turn.

use async_trait::async_trait;

use crate::error::WayfareError;

/// Ambient scope for a tool invocation.
///
/// Carries the identity of the conversation the tool is running inside,
/// so tools can scope reads and writes without taking identity arguments
/// through the model-facing schema.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub user_id: String,
    pub thread_id: String,
}

/// Result of a tool invocation, always rendered to the model as text.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub content: String,
    /// True when the content describes a failure rather than a result.
    pub is_error: bool,
}

impl ToolOutput {
    pub fn ok(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}

/// A capability the generation service can request by name.
///
/// Tools are registered with the orchestrator and described to the model
/// via a JSON Schema. Invocation failures should be reported through
/// [`ToolOutput::error`] so the model can react; `Err` is reserved for
/// infrastructure failures the tool cannot express as text.
#[async_trait]
pub trait Tool: Send + Sync + 'static {
    /// The name the model uses to request this tool.
    fn name(&self) -> &str;

    /// Human-readable description shown to the model.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's arguments.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Executes the tool with the given arguments.
    async fn invoke(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext,
    ) -> Result<ToolOutput, WayfareError>;
}
