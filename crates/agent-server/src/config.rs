//! Server Configuration
//!
//! Read from the environment after `.env` has been loaded.

use std::str::FromStr;

use anyhow::Context;

use agent_core::provider::{DEFAULT_MODEL, GenerationOptions};
use agent_core::reasoning::DEFAULT_MAX_ITERATIONS;

/// Path that selects the in-memory preference store
pub const IN_MEMORY_DATABASE: &str = ":memory:";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_addr: String,

    /// SQLite file for preferences, or `:memory:`
    pub database_path: String,

    /// Inference cycle cap per run
    pub max_iterations: usize,

    /// Model identifier sent to the provider
    pub model: String,

    /// Output token limit per inference call
    pub max_tokens: u32,

    /// Sampling temperature; provider default when unset
    pub temperature: Option<f32>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            database_path: "restaurant-finder.db".into(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            model: DEFAULT_MODEL.into(),
            max_tokens: GenerationOptions::default().max_tokens,
            temperature: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            max_iterations: parse_var(&lookup, "AGENT_MAX_ITERATIONS")?.unwrap_or(defaults.max_iterations),
            max_tokens: parse_var(&lookup, "ANTHROPIC_MAX_TOKENS")?.unwrap_or(defaults.max_tokens),
            temperature: parse_var(&lookup, "ANTHROPIC_TEMPERATURE")?,
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            database_path: lookup("DATABASE_PATH").unwrap_or(defaults.database_path),
            model: lookup("ANTHROPIC_MODEL").unwrap_or(defaults.model),
        })
    }

    pub fn uses_in_memory_store(&self) -> bool {
        self.database_path == IN_MEMORY_DATABASE
    }
}

/// Parse an optional variable; present but malformed is an error
fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.parse()
                .with_context(|| format!("{} has an invalid value {:?}", key, raw))
        })
        .transpose()
}
