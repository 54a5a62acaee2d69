//! Application State

use std::sync::Arc;

use agent_core::Agent;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Agent with the restaurant tools registered
    pub agent: Arc<Agent>,
}

impl AppState {
    pub fn new(agent: Agent) -> Self {
        Self {
            agent: Arc::new(agent),
        }
    }
}
