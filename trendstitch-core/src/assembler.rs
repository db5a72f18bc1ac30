//! Series assembly: plan windows, fetch one batch per window, fold batches
//! oldest-to-newest into one consistent daily series per requested scope.
//!
//! One assembly is strictly sequential: every merge step depends on the
//! previously merged prefix. Parallelism across *requests* lives in the
//! facade crate; nothing here shares mutable state between assemblies.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};

use crate::StitchError;
use crate::planner;
use crate::provider::{FetchOutcome, InterestProvider};
use crate::reconcile::{merge_overlap, rescale_to_weights};
use crate::series::{Batch, DailySeries, MonthlyWeights};
use trendstitch_types::{
    InterestRequest, InterestResult, NamedSeries, PlannerConfig, PropertyScope, QualityIssue,
    Resolution, Window, summarize,
};

/// Fetch counters for one assembly, folded into run metrics by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    /// Provider fetches issued (per window, per scope).
    pub windows_fetched: u64,
    /// Fetches that produced no usable data and were zero-filled.
    pub windows_no_data: u64,
}

/// One completed assembly: the immutable result record plus its counters.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    /// The assembled result record.
    pub result: InterestResult,
    /// Fetch counters for this assembly.
    pub stats: AssemblyStats,
}

/// Drives the INIT → PLANNING → FETCHING → RECONCILING → DONE pipeline for
/// one request at a time.
pub struct Assembler {
    provider: Arc<dyn InterestProvider>,
    planner: PlannerConfig,
    provider_timeout: Duration,
    today: NaiveDate,
}

impl Assembler {
    /// Build an assembler over `provider` with the given planner parameters
    /// and per-call timeout. "Now" defaults to the current UTC date.
    #[must_use]
    pub fn new(
        provider: Arc<dyn InterestProvider>,
        planner: PlannerConfig,
        provider_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            planner,
            provider_timeout,
            today: Utc::now().date_naive(),
        }
    }

    /// Pin the date treated as "now" for cutoff decisions. Primarily for
    /// deterministic tests and replays.
    #[must_use]
    pub const fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Assemble one request into a result record.
    ///
    /// Degraded windows never abort the run: a window with no usable data is
    /// zero-filled and flagged, an undefined seam falls back to scale 1 and
    /// is flagged, and a final length mismatch is flagged on the best-effort
    /// series. Only malformed requests and hard provider failures error.
    ///
    /// Assembling the same request twice against identical provider responses
    /// yields an identical result.
    ///
    /// # Errors
    /// `StitchError::InvalidRequest` for a malformed request,
    /// `StitchError::InvalidRange` when no windows can be planned, and any
    /// hard provider error (`Provider`, `ProviderUnavailable`) as-is.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, req), fields(keyword = %req.identity, span = %req.span))
    )]
    pub async fn assemble(&self, req: &InterestRequest) -> Result<Assembly, StitchError> {
        // INIT
        validate(req)?;

        // PLANNING
        let windows = planner::plan(req.span, req.strategy, self.today, &self.planner)?;
        if windows.is_empty() {
            return Err(StitchError::invalid_range(format!(
                "no windows cover {}",
                req.span
            )));
        }

        // FETCHING + RECONCILING, one sequential fold per scope.
        let mut stats = AssemblyStats::default();
        let mut issues: Vec<QualityIssue> = Vec::new();
        let mut series: Vec<NamedSeries> = Vec::with_capacity(req.scopes.len());
        for &scope in &req.scopes {
            let values = match windows[0].resolution {
                Resolution::Monthly => {
                    self.fold_monthly_weighted(req, &windows, scope, &mut issues, &mut stats)
                        .await?
                }
                Resolution::Daily => {
                    self.fold_overlap(req, &windows, scope, &mut issues, &mut stats)
                        .await?
                }
            };
            series.push(NamedSeries { scope, values });
        }

        // DONE: a wrong length is flagged, never silently realigned.
        let expected = usize::try_from(req.span.days()).unwrap_or(0);
        for s in &series {
            if s.values.len() != expected {
                issues.push(QualityIssue::LengthMismatch {
                    scope: s.scope,
                    expected,
                    actual: s.values.len(),
                });
            }
        }

        let flags = summarize(&issues);
        Ok(Assembly {
            result: InterestResult {
                identity: req.identity.clone(),
                span: req.span,
                series,
                flags,
                issues,
            },
            stats,
        })
    }

    /// Left-fold daily windows through the overlap reconciler. Also covers
    /// the trivial single-window case for ranges within the daily cutoff.
    async fn fold_overlap(
        &self,
        req: &InterestRequest,
        windows: &[Window],
        scope: PropertyScope,
        issues: &mut Vec<QualityIssue>,
        stats: &mut AssemblyStats,
    ) -> Result<Vec<f64>, StitchError> {
        let mut assembled: Option<Vec<f64>> = None;
        for window in windows {
            let fetched = self
                .fetch_values(req, window, scope, issues, stats)
                .await?
                .unwrap_or_else(|| vec![0.0; window.expected_len()]);
            assembled = Some(match assembled {
                None => fetched,
                Some(prefix) => {
                    let step = (window.overlap_with_prev as usize)
                        .min(prefix.len())
                        .min(fetched.len());
                    let merged = merge_overlap(&prefix, &fetched, step);
                    if merged.unscaled_fallback {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(window = %window.span, %scope, "overlap scale undefined; appending unscaled");
                        issues.push(QualityIssue::UnscaledSeam {
                            scope,
                            window: window.span,
                        });
                    }
                    merged.values
                }
            });
        }
        Ok(assembled.unwrap_or_default())
    }

    /// Fetch the coarse monthly anchor, then rescale each daily sub-window
    /// against its weights and concatenate; sub-windows tile without overlap.
    async fn fold_monthly_weighted(
        &self,
        req: &InterestRequest,
        windows: &[Window],
        scope: PropertyScope,
        issues: &mut Vec<QualityIssue>,
        stats: &mut AssemblyStats,
    ) -> Result<Vec<f64>, StitchError> {
        let (anchor, subs) = windows
            .split_first()
            .ok_or_else(|| StitchError::invalid_range("monthly plan produced no windows"))?;

        let weights = match self
            .fetch_values(req, anchor, scope, issues, stats)
            .await?
        {
            Some(values) => MonthlyWeights::from_batch(&Batch {
                window: *anchor,
                values,
            })?,
            None => MonthlyWeights::zeros(anchor),
        };

        let mut concatenated: Vec<f64> = Vec::with_capacity(
            usize::try_from(req.span.days()).unwrap_or(0),
        );
        for window in subs {
            let fetched = self.fetch_values(req, window, scope, issues, stats).await?;
            let substituted = fetched.is_none();
            let raw = DailySeries::new(
                window.span.start,
                fetched.unwrap_or_else(|| vec![0.0; window.expected_len()]),
            )?;
            let rescaled = rescale_to_weights(&raw, &weights);
            // A zero-filled substitute is already flagged as NoData; its
            // all-zero months are not a separate loss.
            if !substituted {
                for month in rescaled.zero_raw_months {
                    issues.push(QualityIssue::ZeroRawMonth { scope, month });
                }
            }
            concatenated.extend(rescaled.values);
        }

        let Some(first) = subs.first() else {
            return Ok(Vec::new());
        };
        let series = DailySeries::new(first.span.start, concatenated)?;
        Ok(series.trimmed_to(req.span).into_values())
    }

    /// One provider call with the per-call timeout applied.
    ///
    /// Returns `Ok(None)` for every locally-recovered condition: an explicit
    /// `NoData`, an elapsed timeout, or a batch whose shape does not match
    /// the window (using it would misalign dates). Each pushes a `NoData`
    /// issue. Hard provider errors propagate.
    async fn fetch_values(
        &self,
        req: &InterestRequest,
        window: &Window,
        scope: PropertyScope,
        issues: &mut Vec<QualityIssue>,
        stats: &mut AssemblyStats,
    ) -> Result<Option<Vec<f64>>, StitchError> {
        stats.windows_fetched += 1;
        let call = self.provider.fetch(&req.identity, window, scope);
        let outcome = match tokio::time::timeout(self.provider_timeout, call).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(StitchError::ProviderTimeout { .. })) | Err(_) => FetchOutcome::NoData,
            Ok(Err(e)) => return Err(e),
        };
        let values = match outcome {
            FetchOutcome::Found(batch)
                if batch.window.span == window.span && batch.has_expected_len() =>
            {
                Some(batch.values)
            }
            FetchOutcome::Found(_) | FetchOutcome::NoData => None,
        };
        if values.is_none() {
            #[cfg(feature = "tracing")]
            tracing::warn!(window = %window.span, %scope, "no usable data; zero-filling window");
            stats.windows_no_data += 1;
            issues.push(QualityIssue::NoData {
                scope,
                window: window.span,
            });
        }
        Ok(values)
    }
}

/// Request validation for the INIT state.
fn validate(req: &InterestRequest) -> Result<(), StitchError> {
    if req.identity.keyword.trim().is_empty() && req.identity.topic_id.is_none() {
        return Err(StitchError::invalid_request("empty query identity"));
    }
    if req.span.start > req.span.end {
        return Err(StitchError::invalid_request(format!(
            "start {} is after end {}",
            req.span.start, req.span.end
        )));
    }
    if req.scopes.is_empty() {
        return Err(StitchError::invalid_request("no property scopes requested"));
    }
    for (i, scope) in req.scopes.iter().enumerate() {
        if req.scopes[..i].contains(scope) {
            return Err(StitchError::invalid_request(format!(
                "duplicate property scope: {scope}"
            )));
        }
    }
    Ok(())
}
