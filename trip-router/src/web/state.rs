//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, CachedRouter};
use crate::domain::Network;
use crate::planner::Router;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached router over the loaded network
    pub router: Arc<CachedRouter>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(router: Router, network: Network, cache_config: &CacheConfig) -> Self {
        Self {
            router: Arc::new(CachedRouter::new(router, Arc::new(network), cache_config)),
        }
    }

    /// The loaded network.
    pub fn network(&self) -> &Network {
        self.router.network()
    }
}
