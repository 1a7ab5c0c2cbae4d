// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn orchestration.
//!
//! One turn: append the user message, loop the phase machine until done,
//! checkpoint the final state, return the latest assistant text. Turns on
//! the same thread are serialized; the log is exclusively owned for the
//! duration of a turn.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use wayfare_config::model::WayfareConfig;
use wayfare_core::{
    CheckpointStore, ConversationState, GenerationAdapter, GenerationRequest, Message,
    ToolContext, WayfareError,
};

use crate::executor::ToolExecutor;
use crate::phase::{next_phase, TurnPhase};
use crate::prompt::load_system_prompt;
use crate::registry::ToolRegistry;
use crate::summarizer::Summarizer;

/// Reply used when the generation service fails or times out. The turn
/// still completes and the log stays consistent.
pub const FALLBACK_ASSISTANT_MESSAGE: &str =
    "I'm sorry, I encountered an error processing your request.";

/// Drives conversation turns for all threads.
pub struct Agent {
    generation: Arc<dyn GenerationAdapter>,
    checkpoints: Arc<dyn CheckpointStore>,
    registry: Arc<ToolRegistry>,
    executor: ToolExecutor,
    summarizer: Summarizer,
    system_prompt: String,
    model: String,
    max_tokens: u32,
    max_tool_rounds: usize,
    request_timeout: Duration,
    thread_locks: Mutex<HashMap<String, Weak<Mutex<()>>>>,
}

impl Agent {
    pub async fn new(
        config: &WayfareConfig,
        generation: Arc<dyn GenerationAdapter>,
        checkpoints: Arc<dyn CheckpointStore>,
        registry: Arc<ToolRegistry>,
    ) -> Result<Self, WayfareError> {
        let system_prompt = load_system_prompt(&config.agent).await?;
        let request_timeout = Duration::from_secs(config.agent.request_timeout_secs);
        let summarizer = Summarizer::new(
            generation.clone(),
            config.openai.model.clone(),
            config.openai.max_tokens,
            config.agent.summarization_threshold,
            request_timeout,
        );
        let executor = ToolExecutor::new(registry.clone(), request_timeout);

        Ok(Self {
            generation,
            checkpoints,
            registry,
            executor,
            summarizer,
            system_prompt,
            model: config.openai.model.clone(),
            max_tokens: config.openai.max_tokens,
            max_tool_rounds: config.agent.max_tool_rounds,
            request_timeout,
            thread_locks: Mutex::new(HashMap::new()),
        })
    }

    /// Handles one user message and returns the assistant's reply text.
    ///
    /// Loads (or creates) the thread's conversation, runs the turn to
    /// completion, and checkpoints the result. Concurrent calls for the
    /// same thread are serialized in arrival order.
    pub async fn handle_message(
        &self,
        user_id: &str,
        thread_id: &str,
        text: &str,
    ) -> Result<String, WayfareError> {
        let lock = self.thread_lock(thread_id).await;
        let _guard = lock.lock().await;

        let mut state = self
            .checkpoints
            .load(thread_id)
            .await?
            .unwrap_or_else(|| ConversationState::new(thread_id));
        state.push(Message::user(text));

        let ctx = ToolContext {
            user_id: user_id.to_string(),
            thread_id: thread_id.to_string(),
        };
        self.run_turn(&mut state, &ctx).await;

        self.checkpoints.save(&state).await?;

        Ok(state
            .latest_assistant()
            .map(|m| m.content.clone())
            .unwrap_or_else(|| FALLBACK_ASSISTANT_MESSAGE.to_string()))
    }

    /// Runs the phase machine until the turn is done.
    ///
    /// The loop is iterative and bounded: the generation phase always
    /// appends an assistant message (falling back on error), and tool
    /// rounds are capped at `max_tool_rounds`.
    async fn run_turn(&self, state: &mut ConversationState, ctx: &ToolContext) {
        let mut phase = TurnPhase::Responding;
        let mut rounds = 0usize;

        loop {
            debug!(thread_id = state.thread_id.as_str(), %phase, "turn phase");
            match phase {
                TurnPhase::Responding => self.respond(state).await,
                TurnPhase::ExecutingTools => {
                    rounds += 1;
                    let calls = state
                        .latest_assistant()
                        .map(|m| m.tool_calls.clone())
                        .unwrap_or_default();
                    for result in self.executor.execute_all(&calls, ctx).await {
                        state.push(result);
                    }
                }
                TurnPhase::Summarizing => {
                    if let Err(e) = self.summarizer.maybe_compact(state).await {
                        warn!(
                            thread_id = state.thread_id.as_str(),
                            error = %e,
                            "summarization failed, leaving log as is"
                        );
                    }
                }
                TurnPhase::Done => break,
            }

            let mut next = next_phase(phase, state.latest_assistant());
            if next == TurnPhase::ExecutingTools && rounds >= self.max_tool_rounds {
                warn!(
                    thread_id = state.thread_id.as_str(),
                    rounds, "tool round limit reached, ending tool loop"
                );
                Self::answer_pending_calls(state);
                next = TurnPhase::Summarizing;
            }
            phase = next;
        }
    }

    /// Requests one assistant message, appending a fallback reply on
    /// failure or timeout so the turn always completes.
    async fn respond(&self, state: &mut ConversationState) {
        let request = GenerationRequest {
            model: self.model.clone(),
            system_prompt: Some(self.system_prompt.clone()),
            messages: state.messages.clone(),
            max_tokens: self.max_tokens,
            tools: if self.registry.is_empty() {
                None
            } else {
                Some(self.registry.definitions())
            },
        };

        let reply = match tokio::time::timeout(
            self.request_timeout,
            self.generation.generate(request),
        )
        .await
        {
            Ok(Ok(message)) => message,
            Ok(Err(e)) => {
                warn!(error = %e, "generation failed, using fallback reply");
                Message::assistant(FALLBACK_ASSISTANT_MESSAGE)
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.request_timeout.as_secs(),
                    "generation timed out, using fallback reply"
                );
                Message::assistant(FALLBACK_ASSISTANT_MESSAGE)
            }
        };
        state.push(reply);
    }

    /// Appends error tool results for calls left unanswered when the
    /// round cap cuts the loop. An assistant tool request with no
    /// matching tool replies is not a replayable history.
    fn answer_pending_calls(state: &mut ConversationState) {
        let calls = state
            .latest_assistant()
            .map(|m| m.tool_calls.clone())
            .unwrap_or_default();
        for call in calls {
            state.push(Message::tool_result(
                call.id,
                call.name.clone(),
                format!(
                    "Error executing tool '{}': tool round limit reached",
                    call.name
                ),
            ));
        }
    }

    /// Lock entries for finished threads are swept on the next lookup.
    async fn thread_lock(&self, thread_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.thread_locks.lock().await;
        locks.retain(|_, weak| weak.strong_count() > 0);
        if let Some(lock) = locks.get(thread_id).and_then(Weak::upgrade) {
            return lock;
        }
        let lock = Arc::new(Mutex::new(()));
        locks.insert(thread_id.to_string(), Arc::downgrade(&lock));
        lock
    }
}
