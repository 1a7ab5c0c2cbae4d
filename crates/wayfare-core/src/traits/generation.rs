// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation adapter trait for LLM provider integrations (OpenAI, etc.).

use async_trait::async_trait;

use crate::error::WayfareError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{GenerationRequest, Message};

/// Adapter for language model provider integrations.
///
/// Generation adapters handle communication with chat-completion APIs.
/// The returned message is either plain assistant text or an assistant
/// message carrying tool-call requests for the orchestrator to dispatch.
#[async_trait]
pub trait GenerationAdapter: PluginAdapter {
    /// Sends a completion request and returns the assistant's reply.
    async fn generate(&self, request: GenerationRequest) -> Result<Message, WayfareError>;
}
