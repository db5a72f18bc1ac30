//! Report envelopes produced by batch runs.

use serde::{Deserialize, Serialize};

use crate::error::StitchError;
use crate::records::OutputRecord;

/// Immutable per-run counters, returned with the run report instead of being
/// accumulated in shared process state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunMetrics {
    /// Requests assembled to completion.
    pub requests_completed: u64,
    /// Requests skipped because a prior output record already existed.
    pub requests_skipped: u64,
    /// Requests that errored without producing an output record.
    pub requests_failed: u64,
    /// Requests never attempted because the run halted first.
    pub requests_abandoned: u64,
    /// Provider fetches issued (per window, per scope).
    pub windows_fetched: u64,
    /// Fetches that produced no usable data and were zero-filled.
    pub windows_no_data: u64,
}

/// Outcome of one batch feed run.
///
/// Every record completed before a fatal provider condition is present in
/// `records`, each annotated with the degradations it experienced; a halted
/// run never discards completed work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Completed output records, in completion order.
    pub records: Vec<OutputRecord>,
    /// Per-request failures (keyword, error) that did not halt the run.
    pub failures: Vec<(String, StitchError)>,
    /// Whether the run stopped early on a fatal provider condition.
    pub halted: bool,
    /// Counters for this run.
    pub metrics: RunMetrics,
}
