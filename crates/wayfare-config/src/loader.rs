// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./wayfare.toml` > `~/.config/wayfare/wayfare.toml` > `/etc/wayfare/wayfare.toml`
//! with environment variable overrides via `WAYFARE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::WayfareConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/wayfare/wayfare.toml` (system-wide)
/// 3. `~/.config/wayfare/wayfare.toml` (user XDG config)
/// 4. `./wayfare.toml` (local directory)
/// 5. `WAYFARE_*` environment variables
pub fn load_config() -> Result<WayfareConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WayfareConfig::default()))
        .merge(Toml::file("/etc/wayfare/wayfare.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("wayfare/wayfare.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("wayfare.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<WayfareConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WayfareConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<WayfareConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WayfareConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// CRITICAL: Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `WAYFARE_OPENAI_API_KEY` must
/// map to `openai.api_key`, not `openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("WAYFARE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: WAYFARE_OPENAI_API_KEY -> "openai_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("memory_", "memory.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_string_overrides_defaults() {
        let config = load_config_from_str(
            r#"
[agent]
summarization_threshold = 8

[openai]
model = "gpt-4o-mini"
"#,
        )
        .unwrap();
        assert_eq!(config.agent.summarization_threshold, 8);
        assert_eq!(config.openai.model, "gpt-4o-mini");
        // Untouched sections keep their defaults.
        assert_eq!(config.memory.retrieval_limit, 5);
    }

    #[test]
    fn env_vars_override_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "wayfare.toml",
                r#"
[openai]
model = "gpt-4o"
"#,
            )?;
            jail.set_env("WAYFARE_OPENAI_MODEL", "gpt-4o-mini");
            jail.set_env("WAYFARE_OPENAI_API_KEY", "sk-test");
            let config = load_config().expect("config should load");
            assert_eq!(config.openai.model, "gpt-4o-mini");
            assert_eq!(config.openai.api_key.as_deref(), Some("sk-test"));
            Ok(())
        });
    }

    #[test]
    fn underscore_keys_map_to_correct_section() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("WAYFARE_AGENT_MAX_TOOL_ROUNDS", "4");
            jail.set_env("WAYFARE_MEMORY_RETRIEVAL_LIMIT", "2");
            let config = load_config().expect("config should load");
            assert_eq!(config.agent.max_tool_rounds, 4);
            assert_eq!(config.memory.retrieval_limit, 2);
            Ok(())
        });
    }
}
