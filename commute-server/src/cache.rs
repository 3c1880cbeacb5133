//! Caching layer for journey planner estimates.
//!
//! The journey planner is slow and its answer changes rarely, while the
//! agent ticks every 30 seconds and the status endpoint may be polled by
//! several displays. Live estimates are cached per (origin, destination)
//! for a TTL. Fallback values are never cached, so the next request retries
//! the planner.

use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::sources::JourneyDurationSource;
use crate::tfl::TflClient;

/// Cache key for journey estimates: (origin, destination).
type JourneyKey = (String, String);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached estimates.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(600),
            max_capacity: 64,
        }
    }
}

impl CacheConfig {
    /// Default config with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            ..Self::default()
        }
    }
}

/// Cache for journey time estimates.
#[derive(Clone)]
pub struct JourneyCache {
    estimates: MokaCache<JourneyKey, i64>,
}

impl JourneyCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let estimates = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { estimates }
    }

    /// Get a cached estimate.
    pub async fn get(&self, origin: &str, destination: &str) -> Option<i64> {
        self.estimates
            .get(&(origin.to_string(), destination.to_string()))
            .await
    }

    /// Insert an estimate into the cache.
    pub async fn insert(&self, origin: &str, destination: &str, minutes: i64) {
        self.estimates
            .insert((origin.to_string(), destination.to_string()), minutes)
            .await;
    }
}

/// TfL journey planner with caching and a static fallback.
#[derive(Clone)]
pub struct CachedJourneyTime {
    client: TflClient,
    cache: JourneyCache,
    fallback_minutes: i64,
}

impl CachedJourneyTime {
    /// Create a new cached journey time source.
    pub fn new(client: TflClient, cache_config: &CacheConfig, fallback_minutes: i64) -> Self {
        Self {
            client,
            cache: JourneyCache::new(cache_config),
            fallback_minutes,
        }
    }

    /// Access the underlying cache.
    pub fn cache(&self) -> &JourneyCache {
        &self.cache
    }
}

impl JourneyDurationSource for CachedJourneyTime {
    async fn journey_minutes(&self, origin: &str, destination: &str) -> i64 {
        if let Some(cached) = self.cache.get(origin, destination).await {
            return cached;
        }

        match self.client.get_journey_minutes(origin, destination).await {
            Ok(Some(minutes)) => {
                tracing::info!(origin, destination, minutes, "journey planner estimate");
                self.cache.insert(origin, destination, minutes).await;
                minutes
            }
            Ok(None) => {
                tracing::warn!(
                    origin,
                    destination,
                    fallback = self.fallback_minutes,
                    "journey planner returned no usable itinerary, using fallback"
                );
                self.fallback_minutes
            }
            Err(e) => {
                let transient = e.is_transient();
                tracing::warn!(
                    origin,
                    transient,
                    destination,
                    error = %e,
                    fallback = self.fallback_minutes,
                    "journey planner failed, using fallback"
                );
                self.fallback_minutes
            }
        }
    }
}
