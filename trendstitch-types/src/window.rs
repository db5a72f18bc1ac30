//! Date spans, query windows, and the reconciliation strategy choice.

use chrono::{Datelike, NaiveDate};
use core::fmt;
use serde::{Deserialize, Serialize};

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateSpan {
    /// First day of the span (inclusive).
    pub start: NaiveDate,
    /// Last day of the span (inclusive).
    pub end: NaiveDate,
}

impl DateSpan {
    /// Build a span, rejecting inverted ranges.
    ///
    /// # Errors
    /// Returns `Err` with a description when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if start > end {
            return Err(format!("start {start} is after end {end}"));
        }
        Ok(Self { start, end })
    }

    /// Number of calendar days covered, inclusive of both endpoints.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether `date` falls inside the span.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for DateSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Granularity at which the provider returns samples for a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// One sample per calendar day.
    Daily,
    /// One sample per calendar month.
    Monthly,
}

/// One fetch window as produced by the planner.
///
/// `overlap_with_prev` is the number of calendar days this window shares with
/// the previous window in planner order; it is the reconciliation step for the
/// overlap strategy and is always 0 for the first window and for
/// monthly-weighted sub-windows (which tile without overlap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    /// Date range submitted as one fetch request.
    pub span: DateSpan,
    /// Granularity the provider is expected to answer with.
    pub resolution: Resolution,
    /// Days shared with the previous planner window.
    pub overlap_with_prev: u32,
}

impl Window {
    /// A daily-resolution window with no declared overlap.
    #[must_use]
    pub const fn daily(span: DateSpan) -> Self {
        Self {
            span,
            resolution: Resolution::Daily,
            overlap_with_prev: 0,
        }
    }

    /// A monthly-resolution window (coarse anchor).
    #[must_use]
    pub const fn monthly(span: DateSpan) -> Self {
        Self {
            span,
            resolution: Resolution::Monthly,
            overlap_with_prev: 0,
        }
    }

    /// Number of samples the provider is expected to return for this window.
    #[must_use]
    pub fn expected_len(&self) -> usize {
        match self.resolution {
            Resolution::Daily => usize::try_from(self.span.days()).unwrap_or(0),
            Resolution::Monthly => {
                let (sy, sm) = (self.span.start.year(), self.span.start.month());
                let (ey, em) = (self.span.end.year(), self.span.end.month());
                let months = (i64::from(ey) - i64::from(sy)) * 12
                    + (i64::from(em) - i64::from(sm))
                    + 1;
                usize::try_from(months).unwrap_or(0)
            }
        }
    }
}

/// Per-request reconciliation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Fixed-length sliding daily windows with a known overlap step; seams are
    /// reconciled from the shared days.
    #[default]
    Overlap,
    /// One coarse all-time monthly anchor plus non-overlapping daily
    /// sub-windows rescaled against the coarse monthly weights.
    MonthlyWeighted,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overlap => f.write_str("overlap"),
            Self::MonthlyWeighted => f.write_str("monthly-weighted"),
        }
    }
}
