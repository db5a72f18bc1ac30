//! Feed and output record envelopes.
//!
//! Batch jobs consume one JSON record per input line and emit the same record
//! augmented with a `trends` object. Parsing and writing of the surrounding
//! files is the caller's concern; these are only the shapes.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::identity::{PropertyScope, QueryIdentity};
use crate::quality::{QualityFlags, QualityIssue};
use crate::request::InterestResult;
use crate::window::DateSpan;

fn default_scopes() -> Vec<PropertyScope> {
    vec![PropertyScope::Web]
}

/// One input feed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedRecord {
    /// Keyword (also the record's identity for restart-resume).
    pub keyword: String,
    /// Pre-resolved topic identifier, when the feed carries one.
    #[serde(default, rename = "mid", skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<String>,
    /// First day of the requested range.
    pub start_date: NaiveDate,
    /// Last day of the requested range.
    pub end_date: NaiveDate,
    /// Scopes to assemble; defaults to web only.
    #[serde(default = "default_scopes")]
    pub scopes: Vec<PropertyScope>,
}

impl FeedRecord {
    /// Identity derived from this record.
    #[must_use]
    pub fn identity(&self) -> QueryIdentity {
        QueryIdentity {
            keyword: self.keyword.clone(),
            topic_id: self.topic_id.clone(),
        }
    }
}

/// The `trends` object attached to an output record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendsPayload {
    /// First day covered by every series.
    pub start_date: NaiveDate,
    /// Last day covered by every series.
    pub end_date: NaiveDate,
    /// One entry per requested scope, keyed `<scope>_interest`.
    #[serde(flatten)]
    pub series: BTreeMap<String, Vec<f64>>,
    /// Summary of degradations across all series.
    pub quality_flags: QualityFlags,
    /// Detailed degradation locations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quality_issues: Vec<QualityIssue>,
}

/// An input record augmented with its assembled series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// The original feed record, passed through unchanged.
    #[serde(flatten)]
    pub feed: FeedRecord,
    /// Assembled series and quality annotations.
    pub trends: TrendsPayload,
}

impl OutputRecord {
    /// Build an output record from a feed record and its assembled result.
    #[must_use]
    pub fn from_result(feed: FeedRecord, result: &InterestResult) -> Self {
        let series = result
            .series
            .iter()
            .map(|s| (s.scope.series_name(), s.values.clone()))
            .collect();
        let trends = TrendsPayload {
            start_date: result.span.start,
            end_date: result.span.end,
            series,
            quality_flags: result.flags,
            quality_issues: result.issues.clone(),
        };
        Self { feed, trends }
    }

    /// The requested span for this record.
    #[must_use]
    pub const fn span(&self) -> DateSpan {
        DateSpan {
            start: self.trends.start_date,
            end: self.trends.end_date,
        }
    }

    /// Convenience accessor for the summary flags.
    #[must_use]
    pub const fn flags(&self) -> QualityFlags {
        self.trends.quality_flags
    }
}
