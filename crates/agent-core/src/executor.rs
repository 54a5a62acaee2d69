//! Tool Executor
//!
//! Runs tool requests against the registry and turns every outcome, failure
//! included, into a result the model can read. Nothing raised by a tool
//! escapes `execute`.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::message::{ToolResultBlock, ToolUse};
use crate::tool::ToolRegistry;

/// Normalized result of one tool execution
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutcome {
    /// JSON-encoded output, or `{"error": "..."}` on failure
    pub content: String,

    pub is_error: bool,
}

impl ToolOutcome {
    pub fn success(value: &serde_json::Value) -> Self {
        Self {
            content: value.to_string(),
            is_error: false,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            content: serde_json::json!({ "error": message.into() }).to_string(),
            is_error: true,
        }
    }

    /// Tool-result block answering `request`
    pub fn into_block(self, request: &ToolUse) -> ToolResultBlock {
        ToolResultBlock {
            tool_use_id: request.id.clone(),
            content: self.content,
            is_error: self.is_error,
        }
    }
}

/// Executes tool requests with failure containment
#[derive(Clone, Debug)]
pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
}

impl ToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Execute one tool by name
    pub async fn execute(&self, name: &str, input: serde_json::Value) -> ToolOutcome {
        let started = Instant::now();
        let outcome = match self.registry.dispatch(name, input).await {
            Ok(value) => ToolOutcome::success(&value),
            Err(e) => {
                tracing::warn!(tool = %name, error = %e, "Tool call failed");
                ToolOutcome::failure(e.to_string())
            }
        };

        tracing::debug!(
            tool = %name,
            elapsed_ms = started.elapsed().as_millis() as u64,
            is_error = outcome.is_error,
            "Tool executed"
        );
        outcome
    }

    /// Execute a batch of requests concurrently.
    ///
    /// Outcomes are returned in request order regardless of completion order.
    pub async fn execute_all(&self, requests: &[ToolUse]) -> Vec<ToolOutcome> {
        join_all(
            requests
                .iter()
                .map(|request| self.execute(&request.name, request.input.clone())),
        )
        .await
    }
}
