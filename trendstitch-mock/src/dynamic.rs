use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use trendstitch_core::{
    Batch, FetchOutcome, InterestProvider, PropertyScope, QueryIdentity, Resolution, StitchError,
    Window,
};

use crate::fixtures;

/// Instruction for how a fetch should behave for a matching window.
#[derive(Clone)]
pub enum MockBehavior {
    /// Return these values as a found batch for the requested window.
    Return(Vec<f64>),
    /// Report that the platform has no data for the window.
    NoData,
    /// Fail immediately with the provided error.
    Fail(StitchError),
    /// Hang indefinitely (simulate a network stall).
    Hang,
}

/// One recorded fetch, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    /// Term actually submitted (topic id when present).
    pub term: String,
    /// Requested window.
    pub window: Window,
    /// Requested property scope.
    pub scope: PropertyScope,
}

type RuleKey = (NaiveDate, Resolution, PropertyScope);

#[derive(Default)]
struct InternalState {
    rules: HashMap<RuleKey, MockBehavior>,
    calls: Vec<FetchCall>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Script the behavior for fetches of the window starting at `start` with
    /// the given resolution and scope. Unscripted windows fall back to the
    /// deterministic synthetic data.
    pub async fn set_fetch_behavior(
        &self,
        start: NaiveDate,
        resolution: Resolution,
        scope: PropertyScope,
        behavior: MockBehavior,
    ) {
        let mut guard = self.state.lock().await;
        guard.rules.insert((start, resolution, scope), behavior);
    }

    /// All fetches observed so far, in call order.
    pub async fn calls(&self) -> Vec<FetchCall> {
        self.state.lock().await.calls.clone()
    }

    /// Number of fetches observed so far.
    pub async fn call_count(&self) -> usize {
        self.state.lock().await.calls.len()
    }
}

/// Provider whose per-window behavior is scripted through a
/// [`DynamicMockController`].
pub struct DynamicMockProvider {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockProvider {
    /// Create a provider together with its controller.
    #[must_use]
    pub fn new() -> (Self, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        (
            Self {
                state: Arc::clone(&state),
            },
            DynamicMockController { state },
        )
    }
}

#[async_trait]
impl InterestProvider for DynamicMockProvider {
    fn name(&self) -> &'static str {
        "trendstitch-mock-dynamic"
    }

    async fn fetch(
        &self,
        identity: &QueryIdentity,
        window: &Window,
        scope: PropertyScope,
    ) -> Result<FetchOutcome, StitchError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.push(FetchCall {
                term: identity.query_term().to_owned(),
                window: *window,
                scope,
            });
            guard
                .rules
                .get(&(window.span.start, window.resolution, scope))
                .cloned()
        };
        match behavior {
            Some(MockBehavior::Return(values)) => Ok(FetchOutcome::Found(Batch {
                window: *window,
                values,
            })),
            Some(MockBehavior::NoData) => Ok(FetchOutcome::NoData),
            Some(MockBehavior::Fail(err)) => Err(err),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!("pending future resolved")
            }
            None => Ok(FetchOutcome::Found(fixtures::batch(
                identity.query_term(),
                scope,
                window,
            ))),
        }
    }
}
