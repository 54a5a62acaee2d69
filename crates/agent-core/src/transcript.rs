//! Conversation Transcript
//!
//! Builds the per-run message history: a seeded user message carrying the
//! caller's identity and location, then alternating assistant output and
//! tool-result batches.

use crate::message::{ContentBlock, Message, ToolResultBlock};

/// Ordered message history for a single run
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Start a transcript from the user's message.
    ///
    /// Identity and location are prefixed as metadata so tools can be
    /// addressed without threading them through every call.
    pub fn seed(user_id: &str, message: &str, location: &str) -> Self {
        Self {
            messages: vec![Message::user(format!(
                "[user_id={}] [location={}]\n\n{}",
                user_id, location, message
            ))],
        }
    }

    /// Append raw model output, tool requests included
    pub fn append_assistant_turn(&mut self, content: Vec<ContentBlock>) {
        self.messages.push(Message::assistant(content));
    }

    /// Append one user message holding the results, in the order given.
    ///
    /// Callers pass results in the order of the requests that produced them.
    pub fn append_tool_results(&mut self, results: Vec<ToolResultBlock>) {
        if results.is_empty() {
            return;
        }
        self.messages.push(Message::tool_results(results));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
