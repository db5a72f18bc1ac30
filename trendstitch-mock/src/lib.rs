//! trendstitch-mock
//!
//! CI-safe mock providers: [`MockProvider`] serves deterministic synthetic
//! interest data, and [`DynamicMockProvider`] lets tests script per-window
//! behavior from the outside.

use async_trait::async_trait;

use trendstitch_core::{
    FetchOutcome, InterestProvider, PropertyScope, QueryIdentity, StitchError, Window,
};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockProvider, FetchCall, MockBehavior};

/// Mock provider for CI-safe examples. Returns deterministic synthetic data
/// for any query, with a few magic keywords to exercise failure paths:
///
/// - `FAIL` fails every fetch with a provider error.
/// - `UNAVAILABLE` fails every fetch as an unavailable provider.
/// - `TIMEOUT` answers after a short delay, long enough to trip a small
///   configured deadline.
/// - `NODATA` reports no data for every window.
pub struct MockProvider;

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl InterestProvider for MockProvider {
    fn name(&self) -> &'static str {
        "trendstitch-mock"
    }

    async fn fetch(
        &self,
        identity: &QueryIdentity,
        window: &Window,
        scope: PropertyScope,
    ) -> Result<FetchOutcome, StitchError> {
        let term = identity.query_term();
        match term {
            "FAIL" => {
                return Err(StitchError::provider(
                    "trendstitch-mock",
                    "forced failure",
                ));
            }
            "UNAVAILABLE" => {
                return Err(StitchError::unavailable(
                    "trendstitch-mock",
                    "forced outage",
                ));
            }
            "NODATA" => return Ok(FetchOutcome::NoData),
            "TIMEOUT" => {
                // Keep short to avoid slowing tests excessively.
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
            }
            _ => {}
        }
        Ok(FetchOutcome::Found(fixtures::batch(term, scope, window)))
    }
}
