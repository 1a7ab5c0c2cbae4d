// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! System prompt loading.
//!
//! Resolves the assistant's system prompt from config with the priority
//! file > inline > built-in default.

use tracing::info;

use wayfare_config::model::AgentConfig;
use wayfare_core::WayfareError;

/// Built-in system prompt used when config provides none.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are a travel assistant helping users plan their trips. You remember user
preferences and provide personalized recommendations based on past interactions.

You have access to the following types of memory:
1. Short-term memory: The current conversation thread
2. Long-term memory:
   - Episodic: User preferences and past trip experiences (e.g., \"User prefers window seats\")
   - Semantic: General knowledge about travel destinations and requirements

Always be helpful, personal, and context-aware in your responses.";

/// Loads the system prompt following config priority: file > inline > default.
pub async fn load_system_prompt(config: &AgentConfig) -> Result<String, WayfareError> {
    if let Some(ref file_path) = config.system_prompt_file {
        match tokio::fs::read_to_string(file_path).await {
            Ok(content) => {
                let trimmed = content.trim().to_string();
                if !trimmed.is_empty() {
                    info!(path = file_path.as_str(), "loaded system prompt from file");
                    return Ok(trimmed);
                }
            }
            Err(e) => {
                tracing::warn!(
                    path = file_path.as_str(),
                    error = %e,
                    "failed to read system prompt file, falling back"
                );
            }
        }
    }

    if let Some(ref prompt) = config.system_prompt
        && !prompt.is_empty()
    {
        return Ok(prompt.clone());
    }

    Ok(DEFAULT_SYSTEM_PROMPT.to_string())
}
