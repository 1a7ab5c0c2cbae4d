// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Wayfare assistant.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Author of a conversation message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Tool,
    System,
}

impl Role {
    /// Capitalized label used when rendering a transcript line.
    pub fn transcript_label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
            Role::Tool => "Tool",
            Role::System => "System",
        }
    }
}

/// A tool invocation requested by the generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Call id assigned by the generation service, echoed back on the result.
    pub id: String,
    /// Name of the tool to invoke.
    pub name: String,
    /// JSON arguments for the tool.
    pub args: serde_json::Value,
}

/// A single message in a conversation.
///
/// Messages are immutable once appended; insertion order is the sole
/// causal record. Tool-result messages carry the originating call id and
/// tool name so the generation service can correlate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique id within a conversation.
    pub id: String,
    pub role: Role,
    pub content: String,
    /// Tool invocations requested by an assistant message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// For tool-result messages: the id of the call this answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// For tool-result messages: the name of the tool that produced this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
            tool_name: None,
        }
    }

    /// Creates a user message with a fresh id.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message with a fresh id and no tool calls.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Creates an assistant message carrying tool-call requests.
    pub fn assistant_with_tool_calls(
        content: impl Into<String>,
        tool_calls: Vec<ToolCall>,
    ) -> Self {
        Self {
            tool_calls,
            ..Self::new(Role::Assistant, content)
        }
    }

    /// Creates a system message with a fresh id.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Creates a tool-result message tagged with the originating call.
    pub fn tool_result(
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            tool_call_id: Some(call_id.into()),
            tool_name: Some(tool_name.into()),
            ..Self::new(Role::Tool, content)
        }
    }

    /// Returns true if this message requests at least one tool invocation.
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// The ordered message log for one conversation thread.
///
/// Exclusively owned and mutated by the orchestrator for the duration of
/// one turn; checkpointed between turns. Order is never rearranged, only
/// truncated and replaced during summarization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub thread_id: String,
    pub messages: Vec<Message>,
}

impl ConversationState {
    /// Creates an empty conversation for the given thread.
    pub fn new(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            messages: Vec::new(),
        }
    }

    /// Appends a message to the log.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recently appended message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The most recent assistant message, scanning in reverse order.
    pub fn latest_assistant(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.role == Role::Assistant)
    }
}

/// Category of a long-term memory record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemoryType {
    /// User preferences and past experiences ("prefers window seats").
    Episodic,
    /// General knowledge about destinations and requirements.
    Semantic,
}

/// A request to the generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub model: String,
    pub system_prompt: Option<String>,
    /// Full ordered message log for the thread.
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    /// Tool definitions in the provider wire format, if tools are offered.
    pub tools: Option<Vec<serde_json::Value>>,
}

/// Input for an embedding adapter.
#[derive(Debug, Clone)]
pub struct EmbeddingInput {
    pub texts: Vec<String>,
}

/// Output from an embedding adapter.
#[derive(Debug, Clone)]
pub struct EmbeddingOutput {
    pub embeddings: Vec<Vec<f32>>,
    pub dimensions: usize,
}

/// Identifies the type of adapter behind a plugin seam.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Generation,
    Embedding,
    Storage,
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_string_round_trip() {
        for role in [Role::User, Role::Assistant, Role::Tool, Role::System] {
            let s = role.to_string();
            assert_eq!(Role::from_str(&s).unwrap(), role);
        }
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }

    #[test]
    fn transcript_labels_are_capitalized() {
        assert_eq!(Role::User.transcript_label(), "User");
        assert_eq!(Role::Assistant.transcript_label(), "Assistant");
    }

    #[test]
    fn message_constructors_assign_unique_ids() {
        let a = Message::user("hello");
        let b = Message::user("hello");
        assert_ne!(a.id, b.id);
        assert_eq!(a.role, Role::User);
        assert!(!a.has_tool_calls());
    }

    #[test]
    fn assistant_with_tool_calls_requests_tools() {
        let call = ToolCall {
            id: "call-1".to_string(),
            name: "retrieve_memories".to_string(),
            args: serde_json::json!({"query": "seats"}),
        };
        let msg = Message::assistant_with_tool_calls("", vec![call]);
        assert!(msg.has_tool_calls());
        assert_eq!(msg.tool_calls[0].name, "retrieve_memories");
    }

    #[test]
    fn tool_result_tags_call_id_and_name() {
        let msg = Message::tool_result("call-1", "store_memory", "ok");
        assert_eq!(msg.role, Role::Tool);
        assert_eq!(msg.tool_call_id.as_deref(), Some("call-1"));
        assert_eq!(msg.tool_name.as_deref(), Some("store_memory"));
    }

    #[test]
    fn latest_assistant_scans_in_reverse() {
        let mut state = ConversationState::new("t-1");
        state.push(Message::user("hi"));
        state.push(Message::assistant("first"));
        state.push(Message::user("again"));
        state.push(Message::assistant("second"));
        state.push(Message::tool_result("c", "t", "out"));
        assert_eq!(state.latest_assistant().unwrap().content, "second");
    }

    #[test]
    fn memory_type_string_round_trip() {
        assert_eq!(MemoryType::Episodic.to_string(), "episodic");
        assert_eq!(MemoryType::Semantic.to_string(), "semantic");
        assert_eq!(MemoryType::from_str("episodic").unwrap(), MemoryType::Episodic);
        assert_eq!(MemoryType::from_str("semantic").unwrap(), MemoryType::Semantic);
    }

    #[test]
    fn conversation_state_serde_round_trip() {
        let mut state = ConversationState::new("t-42");
        state.push(Message::user("book me a flight"));
        state.push(Message::assistant("sure"));
        let json = serde_json::to_string(&state).unwrap();
        let back: ConversationState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
