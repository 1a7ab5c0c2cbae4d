// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as threshold ranges and non-empty paths.

use crate::diagnostic::ConfigError;
use crate::model::WayfareConfig;

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &WayfareConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !VALID_LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level must be one of {}, got `{}`",
                VALID_LOG_LEVELS.join(", "),
                config.agent.log_level
            ),
        });
    }

    // The summarizer keeps a summary message plus the most recent message,
    // so any threshold below 3 would re-trigger immediately.
    if config.agent.summarization_threshold < 3 {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.summarization_threshold must be at least 3, got {}",
                config.agent.summarization_threshold
            ),
        });
    }

    if config.agent.max_tool_rounds < 1 {
        errors.push(ConfigError::Validation {
            message: "agent.max_tool_rounds must be at least 1".to_string(),
        });
    }

    if config.agent.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "agent.request_timeout_secs must be positive".to_string(),
        });
    }

    if config.openai.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "openai.base_url must not be empty".to_string(),
        });
    }

    if config.openai.embedding_dimensions == 0 {
        errors.push(ConfigError::Validation {
            message: "openai.embedding_dimensions must be positive".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    for (key, value) in [
        ("memory.dedup_distance", config.memory.dedup_distance),
        ("memory.retrieval_distance", config.memory.retrieval_distance),
    ] {
        if !(0.0..=2.0).contains(&value) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "{key} must be a cosine distance between 0.0 and 2.0, got {value}"
                ),
            });
        }
    }

    if config.memory.retrieval_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "memory.retrieval_limit must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = WayfareConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = WayfareConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))));
    }

    #[test]
    fn out_of_range_distance_fails_validation() {
        let mut config = WayfareConfig::default();
        config.memory.retrieval_distance = 3.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("retrieval_distance"))));
    }

    #[test]
    fn tiny_summarization_threshold_fails_validation() {
        let mut config = WayfareConfig::default();
        config.agent.summarization_threshold = 2;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("summarization_threshold"))));
    }

    #[test]
    fn bad_log_level_fails_validation() {
        let mut config = WayfareConfig::default();
        config.agent.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))));
    }

    #[test]
    fn multiple_errors_are_collected() {
        let mut config = WayfareConfig::default();
        config.storage.database_path = "".to_string();
        config.memory.retrieval_limit = 0;
        config.agent.max_tool_rounds = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
