//! Error Types for Restaurant Finder

use agent_core::AgentError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FinderError>;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("Places API error: {0}")]
    Places(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Preference store error: {0}")]
    Store(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Domain failures surface to the model as tool execution errors
impl From<FinderError> for AgentError {
    fn from(err: FinderError) -> Self {
        AgentError::ToolExecution(err.to_string())
    }
}
