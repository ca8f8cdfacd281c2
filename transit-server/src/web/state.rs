//! Application state for the web layer.

use std::sync::Arc;

use crate::network::NetworkHandle;
use crate::planner::SearchConfig;

/// Shared application state.
///
/// Contains everything needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Current network snapshot
    pub network: NetworkHandle,

    /// Resolver configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: NetworkHandle, config: SearchConfig) -> Self {
        Self {
            network,
            config: Arc::new(config),
        }
    }
}
