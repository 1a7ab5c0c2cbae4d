// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn phase machine.
//!
//! A turn moves through a small set of phases. The transition function is
//! pure: it looks only at the current phase and the most recent assistant
//! message, so the loop in the orchestrator can be tested without any I/O.

use wayfare_core::Message;

/// Phase of the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// Waiting on the generation service for an assistant message.
    Responding,
    /// Running the tool calls the latest assistant message requested.
    ExecutingTools,
    /// Checking whether the log needs compaction before the turn ends.
    Summarizing,
    /// Turn complete.
    Done,
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TurnPhase::Responding => "responding",
            TurnPhase::ExecutingTools => "executing_tools",
            TurnPhase::Summarizing => "summarizing",
            TurnPhase::Done => "done",
        };
        write!(f, "{s}")
    }
}

/// Computes the next phase from the current one and the most recent
/// assistant message.
///
/// After a response, the turn branches on whether the assistant requested
/// tools. Tool execution always hands control back to the generation
/// service. Summarization is terminal for the turn.
pub fn next_phase(current: TurnPhase, latest_assistant: Option<&Message>) -> TurnPhase {
    match current {
        TurnPhase::Responding => match latest_assistant {
            Some(msg) if msg.has_tool_calls() => TurnPhase::ExecutingTools,
            _ => TurnPhase::Summarizing,
        },
        TurnPhase::ExecutingTools => TurnPhase::Responding,
        TurnPhase::Summarizing | TurnPhase::Done => TurnPhase::Done,
    }
}
