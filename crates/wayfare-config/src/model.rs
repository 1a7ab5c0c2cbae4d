// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Wayfare assistant.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Wayfare configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WayfareConfig {
    /// Assistant identity and turn-handling settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// OpenAI-compatible API settings for generation and embeddings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Long-term memory settings.
    #[serde(default)]
    pub memory: MemoryConfig,
}

/// Assistant identity and turn-handling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the assistant.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Inline system prompt string. Overridden by `system_prompt_file` if both set.
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Path to a markdown file containing the system prompt.
    /// Takes precedence over `system_prompt` if both are set.
    #[serde(default)]
    pub system_prompt_file: Option<String>,

    /// Message count at which the conversation log is summarized.
    #[serde(default = "default_summarization_threshold")]
    pub summarization_threshold: usize,

    /// Maximum generate/execute rounds per turn before forcing completion.
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: usize,

    /// Timeout in seconds for each external call (generation, embedding, tool).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            system_prompt: None,
            system_prompt_file: None,
            summarization_threshold: default_summarization_threshold(),
            max_tool_rounds: default_max_tool_rounds(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_agent_name() -> String {
    "wayfare".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_summarization_threshold() -> usize {
    20
}

fn default_max_tool_rounds() -> usize {
    10
}

fn default_request_timeout_secs() -> u64 {
    60
}

/// OpenAI-compatible API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. `None` requires the environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the API (override for compatible servers and tests).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default model to use for chat completion requests.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens to generate per response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Model to use for embedding requests.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Dimensionality requested for embedding vectors.
    #[serde(default = "default_embedding_dimensions")]
    pub embedding_dimensions: usize,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            embedding_model: default_embedding_model(),
            embedding_dimensions: default_embedding_dimensions(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_embedding_dimensions() -> usize {
    384
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("wayfare").join("wayfare.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("wayfare.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Long-term memory configuration.
///
/// Controls write-side deduplication and read-side relevance filtering.
/// Both thresholds are cosine distances: 0.0 is identical, larger is
/// less similar.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Enable the memory system. When false, memory tools are not registered.
    #[serde(default = "default_memory_enabled")]
    pub enabled: bool,

    /// Maximum cosine distance at which a new memory counts as a duplicate
    /// of an existing one and is silently skipped.
    #[serde(default = "default_dedup_distance")]
    pub dedup_distance: f32,

    /// Maximum cosine distance for a memory to be considered relevant
    /// to a retrieval query.
    #[serde(default = "default_retrieval_distance")]
    pub retrieval_distance: f32,

    /// Maximum number of memories returned per retrieval.
    #[serde(default = "default_retrieval_limit")]
    pub retrieval_limit: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            enabled: default_memory_enabled(),
            dedup_distance: default_dedup_distance(),
            retrieval_distance: default_retrieval_distance(),
            retrieval_limit: default_retrieval_limit(),
        }
    }
}

fn default_memory_enabled() -> bool {
    true
}

fn default_dedup_distance() -> f32 {
    0.1
}

fn default_retrieval_distance() -> f32 {
    0.3
}

fn default_retrieval_limit() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = WayfareConfig::default();
        assert_eq!(config.agent.summarization_threshold, 20);
        assert_eq!(config.agent.max_tool_rounds, 10);
        assert_eq!(config.agent.request_timeout_secs, 60);
        assert_eq!(config.openai.embedding_dimensions, 384);
        assert_eq!(config.memory.dedup_distance, 0.1);
        assert_eq!(config.memory.retrieval_distance, 0.3);
        assert_eq!(config.memory.retrieval_limit, 5);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let toml_str = r#"
[agent]
naem = "test"
"#;
        let result = toml::from_str::<WayfareConfig>(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn partial_section_fills_in_defaults() {
        let toml_str = r#"
[memory]
retrieval_limit = 3
"#;
        let config: WayfareConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.memory.retrieval_limit, 3);
        assert_eq!(config.memory.dedup_distance, 0.1);
        assert!(config.memory.enabled);
    }
}
