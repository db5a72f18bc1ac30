//! trendstitch reconstructs long-range daily search-interest series from the
//! windowed, locally-normalized samples an interest platform actually serves.
//!
//! Overview
//! - Plans fetch windows under the platform's resolution rules: recent ranges
//!   come back daily in one call, older ranges only in chunks that are each
//!   rescaled to their own maximum.
//! - Reconciles adjacent chunks onto one scale, either through shared overlap
//!   days or through a coarse all-time monthly anchor.
//! - Wraps the provider with composable middleware (pacing between calls,
//!   memoization of fetch outcomes).
//! - Degrades instead of failing: missing windows are zero-filled, undefined
//!   seams fall back to scale 1, and every such loss is recorded as a quality
//!   flag on the output record.
//!
//! Key behaviors and trade-offs
//! - Overlap strategy: fixed-length sliding windows merged seam by seam; the
//!   shared days determine a scale factor and the seam keeps the average of
//!   both sides. Accurate joins, but twice the fetch volume of plain tiling.
//! - Monthly-weighted strategy: one coarse anchor plus non-overlapping daily
//!   sub-windows rescaled so each month's daily sum matches the anchor's
//!   weight. Fewer requests over long ranges, at monthly granularity of
//!   cross-window consistency.
//! - Feed runs: up to `concurrency` records assembled at once, restart-resume
//!   by keyword, and a halt on persistent provider failure that keeps every
//!   completed record.
//!
//! Examples
//! Assembling one request against a provider:
//! ```rust,ignore
//! use std::sync::Arc;
//! use trendstitch::{Stitcher, CacheMiddleware, PacerMiddleware};
//! use trendstitch::{CacheConfig, PacerConfig};
//!
//! let stitcher = Stitcher::builder()
//!     .with_provider(Arc::new(provider))
//!     .with_middleware(Box::new(CacheMiddleware::new(CacheConfig::default())))
//!     .with_middleware(Box::new(PacerMiddleware::new(PacerConfig::default())))
//!     .build()?;
//!
//! let result = stitcher.assemble(&req).await?;
//! for series in &result.series {
//!     println!("{}: {} days", series.scope.series_name(), series.values.len());
//! }
//! ```
//!
//! Running a feed with restart-resume:
//! ```rust,ignore
//! let records = trendstitch::parse_feed(&input)?;
//! let report = stitcher.run_feed(records, &done_ids).await;
//! println!("{} completed, halted: {}", report.records.len(), report.halted);
//! ```
//!
//! See `trendstitch/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod runner;

pub use core::{Stitcher, StitcherBuilder};
pub use runner::parse_feed;

pub use trendstitch_middleware::{CacheMiddleware, PacerMiddleware};

// Re-export core types for convenience
pub use trendstitch_core::{
    Assembler,
    Batch,
    CacheConfig,
    DailySeries,
    DateSpan,
    FeedRecord,
    FetchOutcome,
    InterestProvider,
    InterestRequest,
    InterestResult,
    Middleware,
    MiddlewareDescriptor,
    MiddlewareLayer,
    MonthlyWeights,
    NamedSeries,
    OutputRecord,
    PacerConfig,
    PlannerConfig,
    PropertyScope,
    QualityFlags,
    QualityIssue,
    QueryIdentity,
    Resolution,
    RunMetrics,
    RunReport,
    StitchConfig,
    StitchError,
    Strategy,
    TrendsPayload,
    Window,
};
