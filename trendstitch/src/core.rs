use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use trendstitch_core::{Assembler, Assembly, InterestProvider, Middleware, StitchError};
use trendstitch_types::{
    InterestRequest, InterestResult, MiddlewareDescriptor, MiddlewareLayer, PlannerConfig,
    StitchConfig, Strategy,
};

/// Orchestrator that assembles interest series through a middleware-wrapped
/// provider.
pub struct Stitcher {
    pub(crate) provider: Arc<dyn InterestProvider>,
    pub(crate) cfg: StitchConfig,
    pub(crate) middleware: MiddlewareDescriptor,
    pub(crate) today: Option<NaiveDate>,
}

impl fmt::Debug for Stitcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stitcher")
            .field("provider", &self.provider.name())
            .field("cfg", &self.cfg)
            .field("middleware", &self.middleware)
            .field("today", &self.today)
            .finish()
    }
}

/// Builder for constructing a `Stitcher` with custom configuration.
pub struct StitcherBuilder {
    provider: Option<Arc<dyn InterestProvider>>,
    /// Middleware layers in outermost-first order; applied in reverse during
    /// `build()` so that `layers[0](layers[1](...(raw)))` holds.
    layers: Vec<Box<dyn Middleware>>,
    cfg: StitchConfig,
    today: Option<NaiveDate>,
}

impl Default for StitcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StitcherBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Starts with no provider; you must register exactly one via
    /// [`with_provider`](Self::with_provider). Defaults follow the platform's
    /// published behavior: a 269-day daily cutoff, 30-day sliding windows,
    /// 6-month sub-windows, a 10s per-call timeout, and 4 concurrent
    /// assemblies in feed runs.
    #[must_use]
    pub fn new() -> Self {
        Self {
            provider: None,
            layers: Vec::new(),
            cfg: StitchConfig::default(),
            today: None,
        }
    }

    /// Register the interest provider.
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn InterestProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Add a middleware layer around the provider.
    ///
    /// The first layer added becomes the outermost wrapper. The usual stack
    /// is cache outside pacer, so a cache hit does not consume a pacing slot:
    ///
    /// ```text
    /// .with_middleware(CacheMiddleware)   // outermost
    /// .with_middleware(PacerMiddleware)   // wraps the raw provider
    /// ```
    #[must_use]
    pub fn with_middleware(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.push(layer);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: StitchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Planner parameters (cutoff, window length, sub-window length, history
    /// start).
    #[must_use]
    pub const fn planner(mut self, planner: PlannerConfig) -> Self {
        self.cfg.planner = planner;
        self
    }

    /// Default reconciliation strategy for feed records, which carry no
    /// strategy of their own. Explicit `InterestRequest`s choose per request.
    #[must_use]
    pub const fn strategy(mut self, strategy: Strategy) -> Self {
        self.cfg.strategy = strategy;
        self
    }

    /// Set the per-provider-call timeout. An elapsed call is treated as "no
    /// data" for that window, never as a failed run.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Maximum number of feed requests assembled concurrently.
    #[must_use]
    pub const fn concurrency(mut self, concurrency: usize) -> Self {
        self.cfg.concurrency = concurrency;
        self
    }

    /// Pin the date treated as "now" for planner cutoff decisions. Primarily
    /// for deterministic tests and replays.
    #[must_use]
    pub const fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Build the `Stitcher`, wrapping the provider in the registered
    /// middleware layers.
    ///
    /// # Errors
    /// Returns `InvalidRequest` if no provider has been registered.
    pub fn build(self) -> Result<Stitcher, StitchError> {
        let Some(raw) = self.provider else {
            return Err(StitchError::invalid_request(
                "no provider registered; add one via with_provider(...)",
            ));
        };

        let mut middleware = MiddlewareDescriptor::new();
        for layer in &self.layers {
            middleware.push_inner(MiddlewareLayer::new(layer.name(), layer.config_json()));
        }
        middleware.push_inner(MiddlewareLayer::new(raw.name(), serde_json::json!({})));

        let mut provider = raw;
        for layer in self.layers.into_iter().rev() {
            provider = layer.apply(provider);
        }

        Ok(Stitcher {
            provider,
            cfg: self.cfg,
            middleware,
            today: self.today,
        })
    }
}

impl Stitcher {
    /// Start building a new `Stitcher` instance.
    ///
    /// Typical usage chains the provider and middleware registration, e.g.:
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use trendstitch::{CacheMiddleware, PacerMiddleware, Stitcher};
    /// use trendstitch_types::{CacheConfig, PacerConfig};
    ///
    /// let stitcher = Stitcher::builder()
    ///     .with_provider(Arc::new(provider))
    ///     .with_middleware(Box::new(CacheMiddleware::new(CacheConfig::default())))
    ///     .with_middleware(Box::new(PacerMiddleware::new(PacerConfig::default())))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> StitcherBuilder {
        StitcherBuilder::new()
    }

    /// The effective configuration.
    #[must_use]
    pub const fn config(&self) -> &StitchConfig {
        &self.cfg
    }

    /// Introspection of the middleware stack, outermost layer first, with the
    /// raw provider as the innermost entry.
    #[must_use]
    pub const fn middleware(&self) -> &MiddlewareDescriptor {
        &self.middleware
    }

    /// Assemble one request into a result record through the middleware
    /// stack.
    ///
    /// # Errors
    /// `StitchError::InvalidRequest`/`InvalidRange` for malformed requests
    /// and hard provider errors as-is; degraded windows surface as quality
    /// flags on the result instead.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, req), fields(keyword = %req.identity, span = %req.span))
    )]
    pub async fn assemble(&self, req: &InterestRequest) -> Result<InterestResult, StitchError> {
        Ok(self.assemble_with_stats(req).await?.result)
    }

    pub(crate) async fn assemble_with_stats(
        &self,
        req: &InterestRequest,
    ) -> Result<Assembly, StitchError> {
        let mut assembler = Assembler::new(
            Arc::clone(&self.provider),
            self.cfg.planner,
            self.cfg.provider_timeout,
        );
        if let Some(today) = self.today {
            assembler = assembler.with_today(today);
        }
        assembler.assemble(req).await
    }
}
