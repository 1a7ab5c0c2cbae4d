// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock generation adapter for deterministic testing.
//!
//! `MockGeneration` implements `GenerationAdapter` with pre-configured replies,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use wayfare_core::{
    AdapterType, GenerationAdapter, GenerationRequest, HealthStatus, Message, PluginAdapter,
    WayfareError,
};

/// A mock generation service that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue; a queued `Err` simulates a service
/// failure. When the queue is empty, a default assistant message with text
/// "mock response" is returned. Every received request is recorded for
/// later inspection.
pub struct MockGeneration {
    replies: Arc<Mutex<VecDeque<Result<Message, WayfareError>>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockGeneration {
    /// Create a new mock with an empty reply queue.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock pre-loaded with the given assistant messages.
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(messages.into_iter().map(Ok).collect())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a reply message.
    pub async fn add_message(&self, message: Message) {
        self.replies.lock().await.push_back(Ok(message));
    }

    /// Queue a service failure.
    pub async fn add_failure(&self, message: &str) {
        self.replies.lock().await.push_back(Err(WayfareError::Generation {
            message: message.to_string(),
            source: None,
        }));
    }

    /// All requests received so far, in arrival order.
    pub async fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockGeneration {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockGeneration {
    fn name(&self) -> &str {
        "mock-generation"
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
impl GenerationAdapter for MockGeneration {
    async fn generate(&self, request: GenerationRequest) -> Result<Message, WayfareError> {
        self.requests.lock().await.push(request);
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(Message::assistant("mock response")))
    }
}
