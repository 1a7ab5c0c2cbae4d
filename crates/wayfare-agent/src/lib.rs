// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn orchestration for the Wayfare assistant.
//!
//! The phase machine in [`phase`] decides what happens next in a turn; the
//! [`orchestrator::Agent`] drives it, calling out to the generation service,
//! the tool executor, and the summarizer. Everything here works against the
//! adapter traits in `wayfare-core`, so the whole loop runs under test with
//! in-process mocks.

pub mod executor;
pub mod orchestrator;
pub mod phase;
pub mod prompt;
pub mod registry;
pub mod summarizer;

pub use executor::ToolExecutor;
pub use orchestrator::{Agent, FALLBACK_ASSISTANT_MESSAGE};
pub use phase::{next_phase, TurnPhase};
pub use prompt::{load_system_prompt, DEFAULT_SYSTEM_PROMPT};
pub use registry::ToolRegistry;
pub use summarizer::{Summarizer, SUMMARY_SYSTEM_PROMPT};
