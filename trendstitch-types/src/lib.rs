//! Data transfer objects, configuration, and error taxonomy shared across the
//! trendstitch workspace.
#![warn(missing_docs)]

mod config;
mod error;
mod identity;
mod middleware;
mod quality;
mod records;
mod reports;
mod request;
mod window;

pub use config::{CacheConfig, PacerConfig, PlannerConfig, StitchConfig};
pub use error::StitchError;
pub use identity::{PropertyScope, QueryIdentity};
pub use middleware::{MiddlewareDescriptor, MiddlewareLayer};
pub use quality::{QualityFlags, QualityIssue, summarize};
pub use records::{FeedRecord, OutputRecord, TrendsPayload};
pub use reports::{RunMetrics, RunReport};
pub use request::{InterestRequest, InterestResult, NamedSeries};
pub use window::{DateSpan, Resolution, Strategy, Window};
