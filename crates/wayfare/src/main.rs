// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wayfare - a conversational travel assistant with long-term memory.
//!
//! This is the binary entry point for the Wayfare assistant.

use clap::{Parser, Subcommand};

use wayfare_config::model::WayfareConfig;
use wayfare_core::WayfareError;

mod shell;
mod wiring;

/// Wayfare - a conversational travel assistant with long-term memory.
#[derive(Parser, Debug)]
#[command(name = "wayfare", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch an interactive REPL session.
    Shell {
        /// Thread to resume; a fresh thread is created when omitted.
        #[arg(long)]
        thread: Option<String>,

        /// User identity for memory scoping.
        #[arg(long, default_value = "local")]
        user: String,
    },
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match wayfare_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            wayfare_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let result = match cli.command {
        Some(Commands::Shell { thread, user }) => shell::run_shell(config, thread, user).await,
        Some(Commands::Config) => print_config(config),
        None => {
            println!("wayfare: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber. `RUST_LOG` overrides the configured
/// level; diagnostics go to stderr so the REPL owns stdout.
fn init_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Renders the effective configuration as TOML with secrets redacted.
fn print_config(mut config: WayfareConfig) -> Result<(), WayfareError> {
    config.openai.api_key = config.openai.api_key.map(|_| "<redacted>".to_string());
    let rendered = toml::to_string_pretty(&config)
        .map_err(|e| WayfareError::Internal(format!("failed to render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rendering_redacts_api_key() {
        let mut config = WayfareConfig::default();
        config.openai.api_key = Some("sk-secret".to_string());
        config.openai.api_key = config.openai.api_key.map(|_| "<redacted>".to_string());
        let rendered = toml::to_string_pretty(&config).unwrap();
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn cli_parses_shell_with_thread() {
        let cli = Cli::parse_from(["wayfare", "shell", "--thread", "t-1", "--user", "alice"]);
        match cli.command {
            Some(Commands::Shell { thread, user }) => {
                assert_eq!(thread.as_deref(), Some("t-1"));
                assert_eq!(user, "alice");
            }
            _ => panic!("expected shell subcommand"),
        }
    }

    #[test]
    fn cli_defaults_user_to_local() {
        let cli = Cli::parse_from(["wayfare", "shell"]);
        match cli.command {
            Some(Commands::Shell { thread, user }) => {
                assert!(thread.is_none());
                assert_eq!(user, "local");
            }
            _ => panic!("expected shell subcommand"),
        }
    }
}
