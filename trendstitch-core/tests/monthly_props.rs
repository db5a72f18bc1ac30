use chrono::{Datelike, Days, NaiveDate};
use proptest::prelude::*;
use trendstitch_core::{Batch, DailySeries, DateSpan, MonthlyWeights, Window, rescale_to_weights};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn weights_over(start: NaiveDate, end: NaiveDate, values: Vec<f64>) -> MonthlyWeights {
    MonthlyWeights::from_batch(&Batch {
        window: Window::monthly(DateSpan { start, end }),
        values,
    })
    .unwrap()
}

#[test]
fn partial_months_rescale_to_their_weights() {
    // Sub-window: last two days of February, first three of March.
    let raw = DailySeries::new(d(2021, 2, 27), vec![1.0, 1.0, 3.0, 3.0, 3.0]).unwrap();
    let weights = weights_over(d(2021, 2, 1), d(2021, 3, 31), vec![4.0, 15.0]);

    let out = rescale_to_weights(&raw, &weights);
    // Raw monthly totals [2, 9] -> scale factors [2, 5/3].
    assert_eq!(out.values, vec![2.0, 2.0, 5.0, 5.0, 5.0]);
    assert!(out.zero_raw_months.is_empty());
    assert_eq!(out.values[..2].iter().sum::<f64>(), 4.0);
    assert_eq!(out.values[2..].iter().sum::<f64>(), 15.0);
}

#[test]
fn zero_raw_month_with_positive_weight_is_zeroed_and_reported() {
    // January raw is all zero but carries coarse weight; February has data.
    let raw = DailySeries::new(d(2021, 1, 30), vec![0.0, 0.0, 2.0, 2.0]).unwrap();
    let weights = weights_over(d(2021, 1, 1), d(2021, 2, 28), vec![7.0, 8.0]);

    let out = rescale_to_weights(&raw, &weights);
    assert_eq!(out.values, vec![0.0, 0.0, 4.0, 4.0]);
    assert_eq!(out.zero_raw_months, vec![d(2021, 1, 1)]);
}

#[test]
fn zero_raw_month_with_zero_weight_is_not_reported() {
    let raw = DailySeries::new(d(2021, 1, 30), vec![0.0, 0.0, 2.0, 2.0]).unwrap();
    let weights = weights_over(d(2021, 1, 1), d(2021, 2, 28), vec![0.0, 8.0]);

    let out = rescale_to_weights(&raw, &weights);
    assert_eq!(out.values, vec![0.0, 0.0, 4.0, 4.0]);
    assert!(out.zero_raw_months.is_empty());
}

#[test]
fn month_outside_weight_coverage_scales_to_zero() {
    // Weights cover January only; February days collapse to zero.
    let raw = DailySeries::new(d(2021, 1, 31), vec![5.0, 5.0]).unwrap();
    let weights = weights_over(d(2021, 1, 1), d(2021, 1, 31), vec![10.0]);

    let out = rescale_to_weights(&raw, &weights);
    assert_eq!(out.values, vec![10.0, 0.0]);
}

proptest! {
    #[test]
    fn monthly_sums_match_weights_within_tolerance(
        start_off in 0u64..700,
        len in 1usize..250,
        raw_seed in proptest::collection::vec(0.0f64..100.0, 250),
        weight_seed in proptest::collection::vec(0.0f64..50.0, 30),
    ) {
        let start = d(2019, 1, 1) + Days::new(start_off);
        let raw_values: Vec<f64> = raw_seed[..len].to_vec();
        let raw = DailySeries::new(start, raw_values).unwrap();

        // Weights covering every month the sub-window touches.
        let w_start = d(2019, 1, 1);
        let w_end = d(2022, 12, 31);
        let months = Window::monthly(DateSpan { start: w_start, end: w_end }).expected_len();
        let weights_vec: Vec<f64> =
            (0..months).map(|i| weight_seed[i % weight_seed.len()]).collect();
        let weights = weights_over(w_start, w_end, weights_vec);

        let out = rescale_to_weights(&raw, &weights);
        prop_assert_eq!(out.values.len(), raw.len());

        // Group scaled values by month and compare sums to the weights.
        let mut idx = 0usize;
        while idx < raw.len() {
            let month = raw.date_at(idx);
            let mut end = idx;
            while end < raw.len()
                && raw.date_at(end).year() == month.year()
                && raw.date_at(end).month() == month.month()
            {
                end += 1;
            }
            let raw_total: f64 = raw.values()[idx..end].iter().sum();
            let scaled_total: f64 = out.values[idx..end].iter().sum();
            if raw_total != 0.0 {
                let weight = weights.weight_for(month);
                prop_assert!(
                    (scaled_total - weight).abs() <= 1e-9 * weight.abs().max(1.0),
                    "month {} sum {} != weight {}",
                    month,
                    scaled_total,
                    weight
                );
            } else {
                prop_assert_eq!(scaled_total, 0.0);
            }
            idx = end;
        }
    }
}
