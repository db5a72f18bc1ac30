//! Re-export of foundational types from `trendstitch-types`.
// Consolidated re-exports so downstream crates can depend on `trendstitch-core` only

pub use trendstitch_types::StitchError;

pub use trendstitch_types::{
    CacheConfig, PacerConfig, PlannerConfig, StitchConfig, Strategy,
};
pub use trendstitch_types::{DateSpan, Resolution, Window};
pub use trendstitch_types::{FeedRecord, OutputRecord, TrendsPayload};
pub use trendstitch_types::{InterestRequest, InterestResult, NamedSeries};
pub use trendstitch_types::{MiddlewareDescriptor, MiddlewareLayer};
pub use trendstitch_types::{PropertyScope, QueryIdentity};
pub use trendstitch_types::{QualityFlags, QualityIssue, summarize};
pub use trendstitch_types::{RunMetrics, RunReport};
