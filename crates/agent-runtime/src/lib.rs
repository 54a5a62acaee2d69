//! # agent-runtime
//!
//! Runtime providers for the restaurant agent.
//!
//! ## Providers
//!
//! - **Anthropic** (default): Messages API with native tool use
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::AnthropicProvider;
//!
//! let provider = AnthropicProvider::from_env()?;
//! let agent = AgentBuilder::new()
//!     .provider(Arc::new(provider))
//!     .build()?;
//! ```

#[cfg(feature = "anthropic")]
pub mod anthropic;

#[cfg(feature = "anthropic")]
pub use anthropic::{AnthropicConfig, AnthropicProvider};

// Re-export core types for convenience
pub use agent_core::{
    Agent, AgentError, LlmProvider, Message, Result, Role, RunResult, Tool, ToolRegistry,
};
