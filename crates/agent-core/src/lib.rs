//! # agent-core
//!
//! Tool-use orchestration loop with a provider-agnostic LLM abstraction and
//! typed tools.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                           Agent                               │
//! │  ┌──────────────┐  ┌──────────────┐  ┌─────────────────────┐  │
//! │  │ Orchestration│  │ ToolExecutor │  │   LlmProvider       │  │
//! │  │     Loop     │──│  + Registry  │  │   (Strategy)        │  │
//! │  └──────┬───────┘  └──────────────┘  └─────────────────────┘  │
//! │         └── Transcript (seeded per run, never persisted)       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait enables swapping inference backends without
//! changing agent logic; `ScriptedProvider` replays canned responses.

pub mod provider;
pub mod tool;
pub mod executor;
pub mod transcript;
pub mod reasoning;
pub mod message;
pub mod error;

pub use error::{AgentError, Result};
pub use executor::{ToolExecutor, ToolOutcome};
pub use message::{ContentBlock, Message, MessageContent, Role, ToolResultBlock, ToolUse};
pub use provider::{Completion, CompletionRequest, GenerationOptions, LlmProvider, StopReason};
pub use reasoning::{Agent, AgentBuilder, AgentConfig, RunResult, ToolCallRecord};
pub use tool::{ParameterSchema, Tool, ToolRegistry, ToolSchema};
pub use transcript::Transcript;
