//! Configuration types shared across the assembler and middleware wrappers.

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::window::Strategy;

/// Planner parameters: the platform's resolution rules expressed as knobs.
///
/// The many near-duplicate crawler scripts this replaces differed only in
/// these values; they are configuration here, never re-implemented per use
/// case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Dates within this many days of "now" return daily-granularity data in
    /// a single call; older starts require chunked windows.
    pub daily_cutoff_days: i64,
    /// Length in days of each sliding window under the overlap strategy.
    /// The overlap step is half of this.
    pub window_len_days: i64,
    /// Length in months of each daily sub-window under the monthly-weighted
    /// strategy.
    pub subwindow_months: u32,
    /// First day of platform history; the coarse monthly anchor starts here.
    pub history_start: NaiveDate,
}

impl PlannerConfig {
    /// Overlap step between consecutive sliding windows.
    #[must_use]
    pub const fn overlap_step(&self) -> i64 {
        self.window_len_days / 2
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            daily_cutoff_days: 269,
            window_len_days: 30,
            subwindow_months: 6,
            // Platform history begins 2004-01-01.
            history_start: NaiveDate::from_ymd_opt(2004, 1, 1).expect("valid date"),
        }
    }
}

/// Top-level configuration for a `Stitcher`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StitchConfig {
    /// Planner parameters.
    pub planner: PlannerConfig,
    /// Default reconciliation strategy for requests that do not choose one.
    pub strategy: Strategy,
    /// Per-call provider timeout; an elapsed call is treated as "no data" for
    /// that window, never as a blocked run.
    pub provider_timeout: Duration,
    /// Maximum number of requests assembled concurrently in a feed run.
    /// Folding within one request is always sequential.
    pub concurrency: usize,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            planner: PlannerConfig::default(),
            strategy: Strategy::default(),
            provider_timeout: Duration::from_secs(10),
            concurrency: 4,
        }
    }
}

/// Configuration for the pacing/admission gate middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacerConfig {
    /// Minimum interval between consecutive provider calls.
    pub min_interval: Duration,
}

impl Default for PacerConfig {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_millis(500),
        }
    }
}

/// Configuration for the fetch memoization middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached fetch outcomes.
    pub capacity: u64,
    /// Time-to-live for a cached outcome.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 4096,
            ttl: Duration::from_secs(60 * 60),
        }
    }
}
