//! Seam reconciliation between an assembled prefix and the next batch.
//!
//! The last `step` days of the prefix and the first `step` days of the batch
//! cover the same calendar days under two independent normalizations. The
//! shared days give an estimate of the relative scale between the two, and
//! both estimates of the true overlap values are averaged to smooth the seam
//! instead of picking one side.

/// Result of one overlap merge.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// Merged values covering the prefix's start through the batch's end.
    pub values: Vec<f64>,
    /// True when every overlap value on the incoming side was zero, leaving
    /// the scale undefined; the batch was appended with scale 1.
    pub unscaled_fallback: bool,
}

/// Merge `batch` onto `prefix`, where the last `step` values of `prefix` and
/// the first `step` values of `batch` cover the same days.
///
/// Postcondition: `values.len() == prefix.len() + batch.len() - step`.
/// Folding planner windows oldest-to-newest through this function yields one
/// unambiguous result; it must not be invoked out of order.
///
/// The caller guarantees `step <= prefix.len()` and `step <= batch.len()`;
/// the planner's `overlap_with_prev` satisfies this by construction.
#[must_use]
pub fn merge_overlap(prefix: &[f64], batch: &[f64], step: usize) -> MergeOutcome {
    debug_assert!(step <= prefix.len() && step <= batch.len());

    let body = &prefix[..prefix.len() - step];
    let overlap_a = &prefix[prefix.len() - step..];
    let overlap_b = &batch[..step];

    // Relative scale from the days both sides observed; zero denominators
    // carry no scale information and are skipped, never divided by.
    let mut ratio_sum = 0.0;
    let mut ratio_count = 0u32;
    for (&a, &b) in overlap_a.iter().zip(overlap_b) {
        if b != 0.0 {
            ratio_sum += a / b;
            ratio_count += 1;
        }
    }
    let (scale, unscaled_fallback) = if ratio_count == 0 {
        // Covers step == 0 as well: a plain append happens at native scale.
        (1.0, true)
    } else {
        (ratio_sum / f64::from(ratio_count), false)
    };

    let mut values = Vec::with_capacity(prefix.len() + batch.len() - step);
    values.extend_from_slice(body);
    values.extend(
        overlap_a
            .iter()
            .zip(overlap_b)
            .map(|(&a, &b)| (a + b * scale) / 2.0),
    );
    values.extend(batch[step..].iter().map(|&v| v * scale));

    MergeOutcome {
        values,
        unscaled_fallback,
    }
}
