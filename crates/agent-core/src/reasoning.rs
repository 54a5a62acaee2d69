//! Orchestration Loop
//!
//! Turns one user turn into rounds of model inference interleaved with tool
//! execution until the model produces a final answer.
//!
//! ```text
//!  AWAITING_MODEL ──(no tool requests)──▶ DONE
//!       ▲    │
//!       │    └──(tool requests)──▶ EXECUTING_TOOLS
//!       └─────────(results appended)───────┘
//! ```
//!
//! Tool failures are reported to the model as error results. Provider
//! failures end the run.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};
use crate::executor::ToolExecutor;
use crate::provider::{CompletionRequest, GenerationOptions, LlmProvider, StopReason};
use crate::tool::{Tool, ToolRegistry, ToolSchema};
use crate::transcript::Transcript;

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// System preamble sent with every inference call
    pub system_prompt: String,

    /// Maximum model calls per run before giving up
    pub max_iterations: usize,

    /// Generation options
    pub generation: GenerationOptions,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            generation: GenerationOptions::default(),
        }
    }
}

pub const DEFAULT_MAX_ITERATIONS: usize = 10;

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant. Use the available tools when they help answer the request, then reply concisely.";

/// Audit record of one tool invocation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRecord {
    /// Tool name
    pub tool: String,

    /// Arguments as requested by the model
    pub input: serde_json::Value,

    /// Serialized output (or error payload)
    pub output: String,

    pub error: bool,
}

/// Final answer plus the ordered tool-call log of one run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    response: String,
    tool_calls: Vec<ToolCallRecord>,
}

impl RunResult {
    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn tool_calls(&self) -> &[ToolCallRecord] {
        &self.tool_calls
    }

    pub fn into_parts(self) -> (String, Vec<ToolCallRecord>) {
        (self.response, self.tool_calls)
    }
}

/// The main Agent struct
pub struct Agent {
    provider: Arc<dyn LlmProvider>,
    executor: ToolExecutor,
    schemas: Vec<ToolSchema>,
    config: AgentConfig,
}

impl Agent {
    /// Create a new agent
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        tools: Arc<ToolRegistry>,
        config: AgentConfig,
    ) -> Self {
        let schemas = tools.schemas();
        Self {
            provider,
            executor: ToolExecutor::new(tools),
            schemas,
            config,
        }
    }

    /// Run one turn for `user_id` at `location`
    pub async fn run(&self, user_id: &str, message: &str, location: &str) -> Result<RunResult> {
        let mut transcript = Transcript::seed(user_id, message, location);
        let mut tool_calls = Vec::new();

        for cycle in 1..=self.config.max_iterations {
            let completion = self
                .provider
                .complete(CompletionRequest {
                    system: &self.config.system_prompt,
                    tools: &self.schemas,
                    messages: transcript.messages(),
                    options: &self.config.generation,
                })
                .await?;

            let requests = completion.tool_requests();
            tracing::debug!(
                cycle,
                provider = self.provider.name(),
                stop_reason = ?completion.stop_reason,
                tool_requests = requests.len(),
                "Model responded"
            );

            if requests.is_empty() {
                if completion.stop_reason != StopReason::EndTurn {
                    tracing::warn!(stop_reason = ?completion.stop_reason, "Model stopped early without tool requests");
                }
                return Ok(RunResult {
                    response: completion.text_content(),
                    tool_calls,
                });
            }

            // No inference call left to read the results
            if cycle == self.config.max_iterations {
                tracing::warn!(
                    dropped_requests = requests.len(),
                    "Cycle cap reached with tool requests pending"
                );
                break;
            }

            let outcomes = self.executor.execute_all(&requests).await;

            let mut results = Vec::with_capacity(requests.len());
            for (request, outcome) in requests.iter().zip(outcomes) {
                tool_calls.push(ToolCallRecord {
                    tool: request.name.clone(),
                    input: request.input.clone(),
                    output: outcome.content.clone(),
                    error: outcome.is_error,
                });
                results.push(outcome.into_block(request));
            }

            transcript.append_assistant_turn(completion.content);
            transcript.append_tool_results(results);
        }

        Err(AgentError::MaxIterations(self.config.max_iterations))
    }

    /// Get the tool registry
    pub fn tools(&self) -> &ToolRegistry {
        self.executor.registry()
    }

    /// Get configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}

/// Builder for Agent configuration
pub struct AgentBuilder {
    provider: Option<Arc<dyn LlmProvider>>,
    tools: ToolRegistry,
    config: AgentConfig,
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            tools: ToolRegistry::new(),
            config: AgentConfig::default(),
        }
    }

    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn tool<T: Tool>(mut self, tool: T) -> Result<Self> {
        self.tools.register(tool)?;
        Ok(self)
    }

    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.generation.model = model.into();
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.config.generation.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.generation.temperature = Some(temp);
        self
    }

    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    pub fn build(self) -> Result<Agent> {
        let provider = self.provider
            .ok_or_else(|| AgentError::Config("Provider is required".into()))?;

        if self.config.max_iterations == 0 {
            return Err(AgentError::Config("max_iterations must be at least 1".into()));
        }

        Ok(Agent::new(provider, Arc::new(self.tools), self.config))
    }
}
