// src/web/state.rs
// Web server state

use std::sync::Arc;

use crate::agent::Agent;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Agent serving every search request
    pub agent: Arc<Agent>,
}

impl AppState {
    pub fn new(agent: Agent) -> Self {
        Self {
            agent: Arc::new(agent),
        }
    }
}
