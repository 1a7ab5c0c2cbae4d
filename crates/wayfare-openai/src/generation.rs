// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation adapter backed by the chat completions endpoint.

use async_trait::async_trait;
use tracing::warn;

use wayfare_config::model::OpenAiConfig;
use wayfare_core::{
    AdapterType, GenerationAdapter, GenerationRequest, HealthStatus, Message, PluginAdapter, Role,
    ToolCall, WayfareError,
};

use crate::client::OpenAiClient;
use crate::types::{
    ChatCompletionRequest, ChatCompletionResponse, WireFunctionCall, WireMessage, WireToolCall,
};

/// Generation adapter for OpenAI-compatible chat completion APIs.
pub struct OpenAiGeneration {
    client: OpenAiClient,
}

impl OpenAiGeneration {
    pub fn new(config: &OpenAiConfig) -> Result<Self, WayfareError> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| WayfareError::Config("openai.api_key is required".to_string()))?;
        Ok(Self {
            client: OpenAiClient::new(api_key, config.base_url.clone())?,
        })
    }
}

#[async_trait]
impl PluginAdapter for OpenAiGeneration {
    fn name(&self) -> &str {
        "openai-generation"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Generation
    }

    async fn health_check(&self) -> Result<HealthStatus, WayfareError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), WayfareError> {
        Ok(())
    }
}

#[async_trait]
impl GenerationAdapter for OpenAiGeneration {
    async fn generate(&self, request: GenerationRequest) -> Result<Message, WayfareError> {
        let wire = build_chat_request(&request);
        let response = self.client.chat_completion(&wire).await?;
        parse_reply(response)
    }
}

/// Converts a generation request into the chat completions wire format.
///
/// The system prompt becomes the first message; the rest of the log follows
/// in order.
fn build_chat_request(request: &GenerationRequest) -> ChatCompletionRequest {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);
    if let Some(ref system_prompt) = request.system_prompt {
        messages.push(WireMessage {
            role: "system".to_string(),
            content: Some(system_prompt.clone()),
            tool_calls: None,
            tool_call_id: None,
            name: None,
        });
    }
    messages.extend(request.messages.iter().map(to_wire_message));

    ChatCompletionRequest {
        model: request.model.clone(),
        messages,
        max_tokens: request.max_tokens,
        tools: request.tools.clone(),
    }
}

fn to_wire_message(message: &Message) -> WireMessage {
    let tool_calls = if message.has_tool_calls() {
        Some(
            message
                .tool_calls
                .iter()
                .map(|call| WireToolCall {
                    id: call.id.clone(),
                    call_type: "function".to_string(),
                    function: WireFunctionCall {
                        name: call.name.clone(),
                        arguments: call.args.to_string(),
                    },
                })
                .collect(),
        )
    } else {
        None
    };

    WireMessage {
        role: message.role.to_string(),
        // Assistant messages that only carry tool calls send null content.
        content: if message.content.is_empty() && tool_calls.is_some() {
            None
        } else {
            Some(message.content.clone())
        },
        tool_calls,
        tool_call_id: message.tool_call_id.clone(),
        name: message.tool_name.clone(),
    }
}

/// Parses the first choice of a chat completion into an assistant message.
fn parse_reply(response: ChatCompletionResponse) -> Result<Message, WayfareError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| WayfareError::Generation {
            message: "API response contained no choices".to_string(),
            source: None,
        })?;

    if choice.message.role != Role::Assistant.to_string() {
        warn!(role = choice.message.role.as_str(), "unexpected reply role");
    }

    let content = choice.message.content.unwrap_or_default();
    let tool_calls: Vec<ToolCall> = choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|call| {
            // Malformed argument JSON still produces a call; the tool's own
            // argument parsing reports the problem back to the model.
            let args = serde_json::from_str(&call.function.arguments).unwrap_or_else(|e| {
                warn!(
                    tool = call.function.name.as_str(),
                    error = %e,
                    "tool call arguments are not valid JSON"
                );
                serde_json::Value::Null
            });
            ToolCall {
                id: call.id,
                name: call.function.name,
                args,
            }
        })
        .collect();

    if tool_calls.is_empty() {
        Ok(Message::assistant(content))
    } else {
        Ok(Message::assistant_with_tool_calls(content, tool_calls))
    }
}
