// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation compaction.
//!
//! Once a thread's log reaches the configured threshold, the whole log is
//! rendered to a transcript, summarized by the generation service, and
//! replaced with exactly two messages: a system message framing the summary
//! and the last pre-compaction message. Compaction failure is non-fatal;
//! the log is simply left as it was.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use wayfare_core::{ConversationState, GenerationAdapter, GenerationRequest, Message, WayfareError};

/// Instruction given to the generation service when summarizing.
pub const SUMMARY_SYSTEM_PROMPT: &str = "\
You are a conversation summarizer. Create a concise summary of the previous
conversation between a user and a travel assistant.

The summary should:
1. Highlight key topics, preferences, and decisions
2. Include any specific trip details (destinations, dates, preferences)
3. Note any outstanding questions or topics that need follow-up
4. Be concise but informative

Format your summary as a brief narrative paragraph.";

/// Compacts conversation logs that have grown past a threshold.
pub struct Summarizer {
    generation: Arc<dyn GenerationAdapter>,
    model: String,
    max_tokens: u32,
    threshold: usize,
    timeout: Duration,
}

impl Summarizer {
    pub fn new(
        generation: Arc<dyn GenerationAdapter>,
        model: impl Into<String>,
        max_tokens: u32,
        threshold: usize,
        timeout: Duration,
    ) -> Self {
        Self {
            generation,
            model: model.into(),
            max_tokens,
            threshold,
            timeout,
        }
    }

    /// Compacts the log if it has reached the threshold.
    ///
    /// Returns `Ok(true)` when the log was replaced, `Ok(false)` when it was
    /// below the threshold. On `Err` the log is guaranteed untouched.
    pub async fn maybe_compact(
        &self,
        state: &mut ConversationState,
    ) -> Result<bool, WayfareError> {
        if state.len() < self.threshold {
            return Ok(false);
        }

        let transcript = render_transcript(&state.messages);
        let request = GenerationRequest {
            model: self.model.clone(),
            system_prompt: Some(SUMMARY_SYSTEM_PROMPT.to_string()),
            messages: vec![Message::user(transcript)],
            max_tokens: self.max_tokens,
            tools: None,
        };

        let reply = match tokio::time::timeout(self.timeout, self.generation.generate(request))
            .await
        {
            Ok(result) => result?,
            Err(_) => {
                return Err(WayfareError::Timeout {
                    duration: self.timeout,
                });
            }
        };

        // The last message carries forward with its original id so the tail
        // of the conversation survives compaction verbatim.
        let last = state
            .last()
            .cloned()
            .ok_or_else(|| WayfareError::Internal("compacting an empty log".to_string()))?;

        let compacted_from = state.len();
        state.messages = vec![Message::system(frame_summary(&reply.content)), last];
        info!(
            thread_id = state.thread_id.as_str(),
            compacted_from, "conversation log compacted"
        );
        Ok(true)
    }
}

/// Renders the full log as "Label: content" lines, one message per line.
fn render_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.role.transcript_label(), m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

fn frame_summary(summary: &str) -> String {
    format!(
        "Summary of the conversation so far:\n\n{summary}\n\n\
         Please continue the conversation based on this summary and the recent messages."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfare_test_utils::MockGeneration;

    fn summarizer(mock: Arc<MockGeneration>, threshold: usize) -> Summarizer {
        Summarizer::new(mock, "test-model", 512, threshold, Duration::from_secs(5))
    }

    fn state_with_messages(count: usize) -> ConversationState {
        let mut state = ConversationState::new("thread-1");
        for i in 0..count {
            if i % 2 == 0 {
                state.push(Message::user(format!("question {i}")));
            } else {
                state.push(Message::assistant(format!("answer {i}")));
            }
        }
        state
    }

    #[tokio::test]
    async fn below_threshold_leaves_log_untouched() {
        let mock = Arc::new(MockGeneration::new());
        let summarizer = summarizer(mock.clone(), 20);
        let mut state = state_with_messages(10);
        let before = state.clone();

        let compacted = summarizer.maybe_compact(&mut state).await.unwrap();
        assert!(!compacted);
        assert_eq!(state, before);
        assert!(mock.requests().await.is_empty());
    }

    #[tokio::test]
    async fn at_threshold_replaces_log_with_two_messages() {
        let mock = Arc::new(MockGeneration::new());
        mock.add_message(Message::assistant("planning a Kyoto trip in May"))
            .await;
        let summarizer = summarizer(mock.clone(), 20);
        let mut state = state_with_messages(20);
        let last_before = state.last().unwrap().clone();

        let compacted = summarizer.maybe_compact(&mut state).await.unwrap();
        assert!(compacted);
        assert_eq!(state.len(), 2);

        let summary = &state.messages[0];
        assert_eq!(summary.role, wayfare_core::Role::System);
        assert!(summary
            .content
            .starts_with("Summary of the conversation so far:\n\nplanning a Kyoto trip in May"));
        assert!(summary
            .content
            .ends_with("Please continue the conversation based on this summary and the recent messages."));

        // The carried-forward message keeps its identity.
        assert_eq!(state.messages[1], last_before);
    }

    #[tokio::test]
    async fn transcript_is_labeled_lines_joined_by_newlines() {
        let mock = Arc::new(MockGeneration::new());
        let summarizer = summarizer(mock.clone(), 2);
        let mut state = ConversationState::new("thread-1");
        state.push(Message::user("hi"));
        state.push(Message::assistant("hello"));

        summarizer.maybe_compact(&mut state).await.unwrap();

        let requests = mock.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].system_prompt.as_deref(),
            Some(SUMMARY_SYSTEM_PROMPT)
        );
        assert_eq!(requests[0].messages.len(), 1);
        assert_eq!(requests[0].messages[0].content, "User: hi\nAssistant: hello");
        assert!(requests[0].tools.is_none());
    }

    #[tokio::test]
    async fn generation_failure_leaves_log_untouched() {
        let mock = Arc::new(MockGeneration::new());
        mock.add_failure("summarization backend down").await;
        let summarizer = summarizer(mock.clone(), 4);
        let mut state = state_with_messages(6);
        let before = state.clone();

        let result = summarizer.maybe_compact(&mut state).await;
        assert!(result.is_err());
        assert_eq!(state, before);
    }
}
