//! Caching layer for route searches.
//!
//! A search outcome depends only on the network and the two endpoints, not
//! on the departure time, so outcomes are cached per endpoint pair and
//! anchored to the requested departure on the way out.
//!
//! Coordinates are quantized to micro-degrees (about 0.1 m) to form keys,
//! bounding cache cardinality without merging genuinely different trips.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{Coordinate, Network};
use crate::planner::{NetworkIndex, Router, SearchError, SearchOutcome};

/// Quantized `(start lat, start lng, end lat, end lng)` in micro-degrees.
type RouteKey = (i64, i64, i64, i64);

/// Cached search outcome.
type RouteEntry = Arc<SearchOutcome>;

const MICRODEGREES: f64 = 1_000_000.0;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 10_000,
        }
    }
}

/// Error from a cached route search.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error(transparent)]
    Search(#[from] SearchError),

    /// The blocking search task panicked or was cancelled
    #[error("search task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Cache for route search outcomes.
pub struct RouteCache {
    routes: MokaCache<RouteKey, RouteEntry>,
}

impl RouteCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { routes }
    }

    /// Compute the key for an endpoint pair.
    /// Returns `None` if any coordinate is not finite.
    fn key(start: Coordinate, end: Coordinate) -> Option<RouteKey> {
        let q = |v: f64| v.is_finite().then(|| (v * MICRODEGREES).round() as i64);
        Some((q(start.lat)?, q(start.lng)?, q(end.lat)?, q(end.lng)?))
    }

    /// Get a cached outcome.
    pub async fn get(&self, start: Coordinate, end: Coordinate) -> Option<RouteEntry> {
        self.routes.get(&Self::key(start, end)?).await
    }

    /// Insert an outcome. Pairs with non-finite coordinates are not cached.
    pub async fn insert(&self, start: Coordinate, end: Coordinate, entry: RouteEntry) {
        if let Some(key) = Self::key(start, end) {
            self.routes.insert(key, entry).await;
        }
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.routes.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.routes.invalidate_all();
    }
}

/// Router bound to one network, with caching.
///
/// Searches run on the blocking thread pool so a long search never stalls
/// the async executor.
pub struct CachedRouter {
    router: Router,
    network: Arc<Network>,
    index: Arc<NetworkIndex>,
    cache: RouteCache,
}

impl CachedRouter {
    /// Create a new cached router, indexing `network` once up front.
    pub fn new(router: Router, network: Arc<Network>, cache_config: &CacheConfig) -> Self {
        let index = Arc::new(NetworkIndex::build(&network));
        Self {
            router,
            network,
            index,
            cache: RouteCache::new(cache_config),
        }
    }

    /// Search from `start` to `end`, using the cache if available.
    pub async fn search(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<RouteEntry, RouteError> {
        if let Some(cached) = self.cache.get(start, end).await {
            debug!(?start, ?end, "Route cache hit");
            return Ok(cached);
        }

        let router = self.router.clone();
        let network = Arc::clone(&self.network);
        let index = Arc::clone(&self.index);
        let outcome = tokio::task::spawn_blocking(move || {
            router.search_indexed(start, end, &network, &index)
        })
        .await??;

        let entry = Arc::new(outcome);
        self.cache.insert(start, end, entry.clone()).await;

        Ok(entry)
    }

    /// The network routes are planned over.
    pub fn network(&self) -> &Arc<Network> {
        &self.network
    }

    /// The underlying router, for calls that bypass the cache.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}
