//! Daily series and batch containers.
//!
//! A [`DailySeries`] is the core data shape: one non-negative value per
//! calendar day, contiguous, anchored at a start date. A [`Batch`] is the raw
//! payload of one provider window, scaled by the provider to its own local
//! maximum; batch values are only comparable within the same batch until
//! reconciliation.

use chrono::{Datelike, Days, NaiveDate};

use crate::StitchError;
use trendstitch_types::{DateSpan, Resolution, Window};

/// A contiguous daily series anchored at a start date.
///
/// Invariant: `values.len()` equals the day count of the covered span.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    start: NaiveDate,
    values: Vec<f64>,
}

impl DailySeries {
    /// Build a series from a start date and one value per day.
    ///
    /// # Errors
    /// Returns `StitchError::InvalidRequest` when `values` is empty (a series
    /// must cover at least one day).
    pub fn new(start: NaiveDate, values: Vec<f64>) -> Result<Self, StitchError> {
        if values.is_empty() {
            return Err(StitchError::invalid_request(
                "daily series must cover at least one day",
            ));
        }
        Ok(Self { start, values })
    }

    /// A zero-filled series covering `span`.
    #[must_use]
    pub fn zeros(span: DateSpan) -> Self {
        let len = usize::try_from(span.days()).unwrap_or(0);
        Self {
            start: span.start,
            values: vec![0.0; len],
        }
    }

    /// First covered day.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last covered day.
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.start + Days::new(self.values.len() as u64 - 1)
    }

    /// Covered span.
    #[must_use]
    pub fn span(&self) -> DateSpan {
        DateSpan {
            start: self.start,
            end: self.end(),
        }
    }

    /// Number of covered days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series is empty. Always false for a constructed series;
    /// present for completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The day-indexed values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consume the series and return its values.
    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Day the value at `index` belongs to.
    #[must_use]
    pub fn date_at(&self, index: usize) -> NaiveDate {
        self.start + Days::new(index as u64)
    }

    /// Keep only the days inside `span`, dropping any earlier anchor-period
    /// overhang and any trailing days past `span.end`.
    #[must_use]
    pub fn trimmed_to(mut self, span: DateSpan) -> Self {
        if self.start < span.start {
            let skip = usize::try_from((span.start - self.start).num_days()).unwrap_or(0);
            let skip = skip.min(self.values.len());
            self.values.drain(..skip);
            self.start = span.start;
        }
        let keep = usize::try_from((span.end - self.start).num_days() + 1).unwrap_or(0);
        self.values.truncate(keep);
        self
    }
}

/// The raw payload returned by the provider for one window: one value per day
/// (daily resolution) or per calendar month (monthly resolution), normalized
/// by the provider to the window's own maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Window the values are scoped to.
    pub window: Window,
    /// Locally-normalized sample values.
    pub values: Vec<f64>,
}

impl Batch {
    /// Whether the value count matches what the window calls for.
    #[must_use]
    pub fn has_expected_len(&self) -> bool {
        self.values.len() == self.window.expected_len()
    }
}

/// Coarse monthly relative weights, anchored at the first day of the first
/// covered month. Built from a monthly-resolution anchor batch.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyWeights {
    first_month: NaiveDate,
    values: Vec<f64>,
}

impl MonthlyWeights {
    /// Build weights from a monthly anchor batch.
    ///
    /// # Errors
    /// Returns `StitchError::InvalidRequest` when the batch is not
    /// monthly-resolution or its length does not match the window.
    pub fn from_batch(batch: &Batch) -> Result<Self, StitchError> {
        if batch.window.resolution != Resolution::Monthly {
            return Err(StitchError::invalid_request(
                "monthly weights require a monthly-resolution batch",
            ));
        }
        if !batch.has_expected_len() {
            return Err(StitchError::invalid_request(format!(
                "monthly anchor batch has {} values, window {} calls for {}",
                batch.values.len(),
                batch.window.span,
                batch.window.expected_len()
            )));
        }
        Ok(Self {
            first_month: month_first_day(batch.window.span.start),
            values: batch.values.clone(),
        })
    }

    /// Zero weights covering the same months as `window`.
    #[must_use]
    pub fn zeros(window: &Window) -> Self {
        Self {
            first_month: month_first_day(window.span.start),
            values: vec![0.0; window.expected_len()],
        }
    }

    /// Relative weight of the month containing `date`; 0 outside coverage.
    #[must_use]
    pub fn weight_for(&self, date: NaiveDate) -> f64 {
        let idx = (i64::from(date.year()) - i64::from(self.first_month.year())) * 12
            + (i64::from(date.month()) - i64::from(self.first_month.month()));
        if idx < 0 {
            return 0.0;
        }
        usize::try_from(idx)
            .ok()
            .and_then(|i| self.values.get(i))
            .copied()
            .unwrap_or(0.0)
    }
}

/// First day of the month containing `date`.
#[must_use]
pub fn month_first_day(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month after the one containing `date`.
#[must_use]
pub fn next_month_first_day(date: NaiveDate) -> NaiveDate {
    let (y, m) = (date.year(), date.month());
    if m == 12 {
        NaiveDate::from_ymd_opt(y + 1, 1, 1).unwrap_or(date)
    } else {
        NaiveDate::from_ymd_opt(y, m + 1, 1).unwrap_or(date)
    }
}
