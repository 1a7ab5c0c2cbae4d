// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `wayfare shell` command implementation.
//!
//! Launches an interactive REPL with a colored prompt and readline history.
//! Each invocation runs against one conversation thread; pass `--thread` to
//! resume a previous one from its checkpoint.

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::info;

use wayfare_config::model::WayfareConfig;
use wayfare_core::{StorageAdapter, WayfareError};

use crate::wiring::build_stack;

/// Runs the `wayfare shell` interactive REPL.
pub async fn run_shell(
    config: WayfareConfig,
    thread: Option<String>,
    user: String,
) -> Result<(), WayfareError> {
    let stack = build_stack(&config).await.inspect_err(|e| {
        if matches!(e, WayfareError::Config(_)) {
            eprintln!(
                "error: OpenAI API key required. Set openai.api_key in wayfare.toml or the WAYFARE_OPENAI_API_KEY env var"
            );
        }
    })?;

    let thread_id = thread.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    info!(thread_id = thread_id.as_str(), user = user.as_str(), "shell session started");

    let mut rl = DefaultEditor::new()
        .map_err(|e| WayfareError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "wayfare shell".bold().green());
    println!("thread: {}", thread_id.dimmed());
    println!("Type {} to exit.\n", "/quit".yellow());

    let prompt = format!("{}> ", "wayfare".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match stack.agent.handle_message(&user, &thread_id, trimmed).await {
                    Ok(reply) => println!("{reply}\n"),
                    Err(e) => eprintln!("{}: {e}", "error".red()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                break;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                break;
            }
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    stack.storage.close().await?;
    println!("{}", "goodbye".dimmed());
    Ok(())
}
