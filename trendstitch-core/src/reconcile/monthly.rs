//! Redistribution of coarse monthly weights across raw daily values.
//!
//! A daily sub-window batch is locally normalized and says nothing about how
//! the sub-window compares to the rest of history. The coarse monthly anchor
//! does: every day in month `m` is rescaled so the month's daily sum matches
//! the anchor's relative weight for `m`.

use chrono::NaiveDate;

use crate::series::{DailySeries, MonthlyWeights, month_first_day, next_month_first_day};

/// Result of rescaling one daily sub-window against the coarse weights.
#[derive(Debug, Clone, PartialEq)]
pub struct RescaleOutcome {
    /// Rescaled daily values, same length and day alignment as the input.
    pub values: Vec<f64>,
    /// Months whose raw daily total was zero under a positive coarse weight.
    /// Their days were forced to zero: the true distribution inside such a
    /// month is unknowable from this data, so the loss is flagged rather
    /// than interpolated away.
    pub zero_raw_months: Vec<NaiveDate>,
}

/// Rescale `raw` so that for every month with a nonzero raw total, the sum of
/// scaled daily values equals the coarse weight of that month. The first and
/// last months of the sub-window may be partial; their partial raw totals are
/// what the weight is spread over.
#[must_use]
pub fn rescale_to_weights(raw: &DailySeries, weights: &MonthlyWeights) -> RescaleOutcome {
    let mut values = Vec::with_capacity(raw.len());
    let mut zero_raw_months = Vec::new();

    let mut month_start = month_first_day(raw.start());
    let mut idx = 0usize;
    while idx < raw.len() {
        let month_end = next_month_first_day(month_start);
        // Days of this month that fall inside the sub-window.
        let mut month_len = 0usize;
        while idx + month_len < raw.len() && raw.date_at(idx + month_len) < month_end {
            month_len += 1;
        }
        let month_raw = &raw.values()[idx..idx + month_len];
        let raw_total: f64 = month_raw.iter().sum();
        let weight = weights.weight_for(month_start);

        let scale = if raw_total == 0.0 {
            if weight > 0.0 {
                zero_raw_months.push(month_start);
            }
            0.0
        } else {
            weight / raw_total
        };
        values.extend(month_raw.iter().map(|&v| v * scale));

        idx += month_len;
        month_start = month_end;
    }

    RescaleOutcome {
        values,
        zero_raw_months,
    }
}
