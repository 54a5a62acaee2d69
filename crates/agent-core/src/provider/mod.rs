//! LLM Provider Strategy Pattern
//!
//! Defines a common interface for model-inference backends with native tool
//! use, so the orchestration loop works with any of them unchanged.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_core::provider::{CompletionRequest, GenerationOptions, LlmProvider};
//!
//! let provider = AnthropicProvider::from_env()?;
//!
//! let completion = provider
//!     .complete(CompletionRequest {
//!         system: "You are helpful.",
//!         tools: &schemas,
//!         messages: transcript.messages(),
//!         options: &GenerationOptions::default(),
//!     })
//!     .await?;
//! ```

mod scripted;

pub use scripted::ScriptedProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::{ContentBlock, Message, ToolUse, join_text};
use crate::tool::ToolSchema;

/// Configuration for LLM generation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model identifier
    pub model: String,

    /// Temperature for sampling; `None` leaves the provider default
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_max_tokens() -> u32 { 4096 }

/// Model used when nothing else is configured
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-6";

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            temperature: None,
            max_tokens: default_max_tokens(),
        }
    }
}

/// One inference call: preamble, tool schemas and the transcript so far
#[derive(Clone, Copy, Debug)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub tools: &'a [ToolSchema],
    pub messages: &'a [Message],
    pub options: &'a GenerationOptions,
}

/// Why the model stopped generating
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    ToolUse,
    MaxTokens,
    StopSequence,
    #[serde(other)]
    Other,
}

/// Token usage statistics
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Response from an LLM completion
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Completion {
    /// Ordered content blocks: text and tool requests
    pub content: Vec<ContentBlock>,

    /// Stop signal reported by the provider
    pub stop_reason: StopReason,

    /// Model that generated this response
    #[serde(default)]
    pub model: String,

    /// Token usage statistics (if available)
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

impl Completion {
    /// Final-answer completion holding a single text block
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            stop_reason: StopReason::EndTurn,
            model: String::new(),
            usage: None,
        }
    }

    /// Completion requesting tools
    pub fn tool_uses(content: Vec<ContentBlock>) -> Self {
        Self {
            content,
            stop_reason: StopReason::ToolUse,
            model: String::new(),
            usage: None,
        }
    }

    /// Tool requests, in order
    pub fn tool_requests(&self) -> Vec<ToolUse> {
        self.content
            .iter()
            .filter_map(ContentBlock::as_tool_use)
            .cloned()
            .collect()
    }

    /// Text blocks joined with newlines
    pub fn text_content(&self) -> String {
        join_text(&self.content)
    }
}

/// Strategy trait for LLM providers
///
/// Implement this trait to add support for new LLM backends.
/// The agent works exclusively through this interface.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g., "Anthropic")
    fn name(&self) -> &str;

    /// Run one inference call
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Completion>;
}
