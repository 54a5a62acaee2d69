//! Scripted Provider
//!
//! Replays a fixed sequence of completions. For tests and offline demos.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Completion, CompletionRequest, LlmProvider};
use crate::error::{AgentError, Result};
use crate::message::Message;

/// Snapshot of one request seen by the provider
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub system: String,
    pub tool_names: Vec<String>,
    pub messages: Vec<Message>,
}

/// Provider returning queued responses in order
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<Completion>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedProvider {
    pub fn new(responses: impl IntoIterator<Item = Completion>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue an error as the next response
    pub async fn push_error(&self, error: AgentError) {
        self.responses.lock().await.push_back(Err(error));
    }

    /// Requests received so far
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of inference calls made
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Completion> {
        self.requests.lock().await.push(RecordedRequest {
            system: request.system.to_string(),
            tool_names: request.tools.iter().map(|t| t.name.clone()).collect(),
            messages: request.messages.to_vec(),
        });

        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(AgentError::Provider("script exhausted".into())))
    }
}
