//! Assembly request and result records.

use serde::{Deserialize, Serialize};

use crate::identity::{PropertyScope, QueryIdentity};
use crate::quality::{QualityFlags, QualityIssue};
use crate::window::{DateSpan, Strategy};

/// One reconciliation request: an identity, a date span, the property scopes
/// to fetch, and the strategy used to stitch the windows back together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestRequest {
    /// What to query.
    pub identity: QueryIdentity,
    /// Date range the output series must cover, day by day.
    pub span: DateSpan,
    /// One series is assembled per scope, in this order.
    pub scopes: Vec<PropertyScope>,
    /// Reconciliation strategy for this request.
    #[serde(default)]
    pub strategy: Strategy,
}

/// A named daily series in an assembled result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSeries {
    /// Scope the series was fetched under.
    pub scope: PropertyScope,
    /// One non-negative value per day of the requested span.
    pub values: Vec<f64>,
}

/// The assembled, immutable result of one request.
///
/// Invariant: each series covers `span` day by day (a deviation is reported
/// through `LENGTH_MISMATCH` rather than silently misaligned dates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestResult {
    /// Identity the result was assembled for.
    pub identity: QueryIdentity,
    /// Date range the series cover.
    pub span: DateSpan,
    /// One entry per requested scope, in request order.
    pub series: Vec<NamedSeries>,
    /// Summary of all degradations across all series.
    pub flags: QualityFlags,
    /// Detailed location of each degradation.
    pub issues: Vec<QualityIssue>,
}

impl InterestResult {
    /// Look up the series assembled for `scope`, if requested.
    #[must_use]
    pub fn series_for(&self, scope: PropertyScope) -> Option<&NamedSeries> {
        self.series.iter().find(|s| s.scope == scope)
    }
}
