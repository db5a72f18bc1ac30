//! The external fetch contract.
//!
//! Transport, cookies, sessions, and rate-limit mechanics are the provider
//! implementation's concern. The core only assumes the call is synchronous
//! from its point of view and idempotent for identical arguments.

use async_trait::async_trait;

use crate::StitchError;
use crate::series::Batch;
use trendstitch_types::{PropertyScope, QueryIdentity, Window};

/// Three-way outcome of one fetch: data, an explicit "nothing usable", or an
/// error (through `Result`). Replaces null-on-no-data control flow with an
/// explicit variant the assembler consumes uniformly.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The provider returned a batch for the window.
    Found(Batch),
    /// The provider answered, but has no usable data for this window.
    NoData,
}

/// Capability trait implemented by interest-data providers.
#[async_trait]
pub trait InterestProvider: Send + Sync {
    /// A stable identifier used in error tagging and logs.
    fn name(&self) -> &'static str;

    /// Fetch one locally-normalized batch for `window` under `scope`.
    ///
    /// # Errors
    /// `StitchError::Provider` for a hard per-call failure,
    /// `StitchError::ProviderTimeout` when the provider gave up on the call,
    /// `StitchError::ProviderUnavailable` for persistent conditions (e.g.
    /// sustained rate limiting) that should halt a run.
    async fn fetch(
        &self,
        identity: &QueryIdentity,
        window: &Window,
        scope: PropertyScope,
    ) -> Result<FetchOutcome, StitchError>;
}
