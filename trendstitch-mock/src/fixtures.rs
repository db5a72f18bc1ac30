//! Deterministic synthetic interest data.
//!
//! Values are a smooth seasonal wave seeded from the query term and scope, so
//! the same query always yields the same numbers and different queries yield
//! visibly different shapes. Everything stays on the platform's 0..=100 scale.

use chrono::{Datelike, Days, Months, NaiveDate};
use trendstitch_core::{Batch, PropertyScope, Resolution, Window};

/// Stable per-(term, scope) seed (FNV-1a over the bytes).
fn seed(term: &str, scope: PropertyScope) -> u64 {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for b in term.bytes().chain(scope.as_str().bytes()) {
        h ^= u64::from(b);
        h = h.wrapping_mul(0x0000_0100_0000_01b3);
    }
    h
}

/// Interest sample for one calendar day under `seed`.
fn sample(seed: u64, date: NaiveDate) -> f64 {
    let day = f64::from(date.num_days_from_ce());
    let phase = (seed % 360) as f64;
    let value = 50.0
        + 30.0 * (day / 29.0 + phase).sin()
        + 15.0 * (day / 353.0 + phase / 2.0).sin();
    value.clamp(0.0, 100.0)
}

/// Build the synthetic batch for one window.
#[must_use]
pub fn batch(term: &str, scope: PropertyScope, window: &Window) -> Batch {
    let s = seed(term, scope);
    let values = match window.resolution {
        Resolution::Daily => (0..window.expected_len())
            .map(|i| sample(s, window.span.start + Days::new(i as u64)))
            .collect(),
        Resolution::Monthly => {
            let mut values = Vec::with_capacity(window.expected_len());
            let mut month = window.span.start.with_day(1).unwrap_or(window.span.start);
            for _ in 0..window.expected_len() {
                values.push(sample(s, month));
                month = month + Months::new(1);
            }
            values
        }
    };
    Batch {
        window: *window,
        values,
    }
}
