//! Fetch memoization provider wrapper.
//!
//! A feed run frequently replays windows it has already asked for, e.g. after
//! a restart or when several scopes share a coarse anchor window. The cache
//! memoizes successful outcomes (found batches and explicit no-data answers)
//! keyed by the full fetch identity. Errors are never cached: a failed call
//! should be retried, not replayed.

use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;

use trendstitch_core::{
    FetchOutcome, InterestProvider, Middleware, PropertyScope, QueryIdentity, StitchError, Window,
};
use trendstitch_types::CacheConfig;

/// Full identity of one fetch for caching discrimination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FetchKey {
    identity: QueryIdentity,
    window: Window,
    scope: PropertyScope,
}

/// Wrapper that memoizes fetch outcomes from the inner provider.
pub struct CachedProvider {
    inner: Arc<dyn InterestProvider>,
    cache: Cache<FetchKey, FetchOutcome>,
}

impl CachedProvider {
    /// Create a new memoizing wrapper around an existing provider.
    #[must_use]
    pub fn new(inner: Arc<dyn InterestProvider>, config: CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.capacity)
            .time_to_live(config.ttl)
            .build();
        Self { inner, cache }
    }

    /// Access the inner provider.
    #[must_use]
    pub fn inner(&self) -> &Arc<dyn InterestProvider> {
        &self.inner
    }
}

#[async_trait]
impl InterestProvider for CachedProvider {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn fetch(
        &self,
        identity: &QueryIdentity,
        window: &Window,
        scope: PropertyScope,
    ) -> Result<FetchOutcome, StitchError> {
        let key = FetchKey {
            identity: identity.clone(),
            window: *window,
            scope,
        };
        if let Some(outcome) = self.cache.get(&key).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(window = %window.span, %scope, "fetch served from cache");
            return Ok(outcome);
        }
        let outcome = self.inner.fetch(identity, window, scope).await?;
        self.cache.insert(key, outcome.clone()).await;
        Ok(outcome)
    }
}

/// Middleware config for constructing a [`CachedProvider`].
pub struct CacheMiddleware {
    /// Cache sizing and expiry parameters.
    pub config: CacheConfig,
}

impl CacheMiddleware {
    #[must_use]
    pub const fn new(config: CacheConfig) -> Self {
        Self { config }
    }
}

impl Middleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn InterestProvider>) -> Arc<dyn InterestProvider> {
        Arc::new(CachedProvider::new(inner, self.config))
    }

    fn name(&self) -> &'static str {
        "CachedProvider"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "capacity": self.config.capacity,
            "ttl_ms": self.config.ttl.as_millis(),
        })
    }
}
