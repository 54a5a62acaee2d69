//! Restaurant Finder HTTP Server
//!
//! Axum-based server exposing the restaurant agent over a single run
//! endpoint plus a health check.

mod app;
mod config;
mod handlers;
mod state;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::AgentBuilder;
use agent_runtime::AnthropicProvider;
use restaurant_finder::{
    GooglePlacesClient, GooglePlacesConfig, MemoryPreferenceStore, PlacesClient, PreferenceStore,
    RESTAURANT_FINDER_PROMPT, SqlitePreferenceStore, build_tool_registry,
};

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Inference provider; a missing key is fatal
    let provider = Arc::new(AnthropicProvider::from_env().context("Failed to configure Anthropic provider")?);
    tracing::info!(model = %config.model, "✓ Anthropic provider configured");

    // Places; a missing key only fails the search tools
    let places_config = GooglePlacesConfig::from_env();
    if places_config.api_key.is_none() {
        tracing::warn!("⚠ GOOGLE_PLACES_API_KEY not set - restaurant search will fail");
    }
    let places: Arc<dyn PlacesClient> = Arc::new(GooglePlacesClient::new(places_config)?);

    // Preferences
    let store: Arc<dyn PreferenceStore> = if config.uses_in_memory_store() {
        tracing::warn!("⚠ Using in-memory preference store - preferences are lost on restart");
        Arc::new(MemoryPreferenceStore::new())
    } else {
        Arc::new(
            SqlitePreferenceStore::open(&config.database_path)
                .with_context(|| format!("Failed to open preference database {}", config.database_path))?,
        )
    };

    let tools = build_tool_registry(places, store)?;
    tracing::info!("Registered {} tools:", tools.len());
    for name in tools.names() {
        tracing::info!("  • {}", name);
    }

    let mut builder = AgentBuilder::new()
        .provider(provider)
        .tools(tools)
        .system_prompt(RESTAURANT_FINDER_PROMPT)
        .model(config.model.clone())
        .max_tokens(config.max_tokens)
        .max_iterations(config.max_iterations);
    if let Some(temperature) = config.temperature {
        builder = builder.temperature(temperature);
    }
    let agent = builder.build()?;

    let app = app::build_router(AppState::new(agent));

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🍜 restaurant finder running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health - Health check");
    tracing::info!("  POST /run    - Run the agent for one message");

    axum::serve(listener, app).await?;

    Ok(())
}
