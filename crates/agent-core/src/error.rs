//! Error Types

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Agent error types
///
/// Tool-side variants (`ToolNotFound`, `ToolValidation`, `ToolExecution`) are
/// contained by the executor and reported to the model. Every other variant
/// aborts the current run.
#[derive(Error, Debug)]
pub enum AgentError {
    /// LLM provider error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Tool not found in registry
    #[error("Unknown tool: {0}")]
    ToolNotFound(String),

    /// Tool arguments could not be decoded into the tool's input record
    #[error("Tool validation error: {0}")]
    ToolValidation(String),

    /// Tool execution failed
    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    /// Maximum model calls reached in the orchestration loop
    #[error("Maximum iterations ({0}) reached")]
    MaxIterations(usize),

    /// Provider response could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rate limited
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AgentError {
    /// Check if error is retryable by the caller.
    ///
    /// The orchestration loop itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AgentError::ProviderUnavailable(_) | AgentError::RateLimited(_)
        )
    }

    /// Whether the error originates inside a tool call
    pub fn is_tool_error(&self) -> bool {
        matches!(
            self,
            AgentError::ToolNotFound(_)
                | AgentError::ToolValidation(_)
                | AgentError::ToolExecution(_)
        )
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AgentError::Provider(_) | AgentError::Parse(_) => "The AI service encountered an error. Please try again.".into(),
            AgentError::ProviderUnavailable(_) => "The AI service is currently unavailable. Please try again.".into(),
            AgentError::ToolNotFound(name) => format!("The tool '{}' is not available.", name),
            AgentError::ToolValidation(msg) => format!("Invalid tool input: {}", msg),
            AgentError::ToolExecution(msg) => format!("Tool error: {}", msg),
            AgentError::MaxIterations(_) => "The request took too long to process. Please try a simpler query.".into(),
            AgentError::RateLimited(_) => "Too many requests to the AI service. Please wait a moment.".into(),
            AgentError::Auth(_) => "The AI service rejected our credentials.".into(),
            _ => "An unexpected error occurred.".into(),
        }
    }
}
