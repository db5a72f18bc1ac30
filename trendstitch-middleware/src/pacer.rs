//! Pacing provider wrapper.
//!
//! The platform tolerates a steady trickle of requests and punishes bursts.
//! The pacer serializes admission: every call through the wrapper is delayed
//! until at least `min_interval` has passed since the previous admission,
//! across all concurrent assemblies sharing the wrapped provider.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use trendstitch_core::{
    FetchOutcome, InterestProvider, Middleware, PropertyScope, QueryIdentity, StitchError, Window,
};
use trendstitch_types::PacerConfig;

/// Wrapper that spaces out calls to the inner provider.
pub struct PacedProvider {
    inner: Arc<dyn InterestProvider>,
    min_interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl PacedProvider {
    /// Create a new pacing wrapper around an existing provider.
    #[must_use]
    pub fn new(inner: Arc<dyn InterestProvider>, config: PacerConfig) -> Self {
        Self {
            inner,
            min_interval: config.min_interval,
            next_slot: Mutex::new(None),
        }
    }

    /// Access the inner provider.
    #[must_use]
    pub fn inner(&self) -> &Arc<dyn InterestProvider> {
        &self.inner
    }

    /// Claim the next admission slot, sleeping until it arrives. The lock is
    /// held only to claim the slot, never across the sleep or the inner call.
    async fn admit(&self) {
        let slot = {
            let mut next = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = match *next {
                Some(at) if at > now => at,
                _ => now,
            };
            *next = Some(slot + self.min_interval);
            slot
        };
        let now = Instant::now();
        if slot > now {
            #[cfg(feature = "tracing")]
            tracing::debug!(wait_ms = (slot - now).as_millis() as u64, "pacing fetch");
            tokio::time::sleep_until(slot).await;
        }
    }
}

#[async_trait]
impl InterestProvider for PacedProvider {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn fetch(
        &self,
        identity: &QueryIdentity,
        window: &Window,
        scope: PropertyScope,
    ) -> Result<FetchOutcome, StitchError> {
        self.admit().await;
        self.inner.fetch(identity, window, scope).await
    }
}

/// Middleware config for constructing a [`PacedProvider`].
pub struct PacerMiddleware {
    /// Pacing parameters.
    pub config: PacerConfig,
}

impl PacerMiddleware {
    #[must_use]
    pub const fn new(config: PacerConfig) -> Self {
        Self { config }
    }
}

impl Middleware for PacerMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn InterestProvider>) -> Arc<dyn InterestProvider> {
        Arc::new(PacedProvider::new(inner, self.config))
    }

    fn name(&self) -> &'static str {
        "PacedProvider"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "min_interval_ms": self.config.min_interval.as_millis(),
        })
    }
}
