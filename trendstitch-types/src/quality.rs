//! Quality annotations for assembled results.
//!
//! A result record carries a compact flag set summarizing which degradations
//! occurred anywhere in the series, plus a detailed issue list locating each
//! degraded segment. Flags are annotations, never errors: an assembled record
//! with flags is still a valid, date-aligned series.

use bitflags::bitflags;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::identity::PropertyScope;
use crate::window::DateSpan;

bitflags! {
    /// Summary of all degradations present in one assembled result.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct QualityFlags: u8 {
        /// At least one window returned no usable data and was zero-filled.
        const NO_DATA = 1 << 0;
        /// At least one overlap seam had no nonzero denominators and the new
        /// batch was appended unscaled.
        const UNSCALED_SEAM = 1 << 1;
        /// At least one month had a zero raw total under a positive coarse
        /// weight; all its days were forced to zero.
        const ZERO_RAW_MONTH = 1 << 2;
        /// The assembled length differed from the requested day count; the
        /// best-effort series was returned anyway.
        const LENGTH_MISMATCH = 1 << 3;
    }
}

/// One localized degradation in an assembled series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum QualityIssue {
    /// The provider returned nothing usable for `window`; the segment was
    /// zero-filled.
    NoData {
        /// Scope of the degraded series.
        scope: PropertyScope,
        /// Window that produced no data.
        window: DateSpan,
    },
    /// The overlap between the assembled prefix and `window` had no nonzero
    /// values on the incoming side; the batch was appended with scale 1.
    UnscaledSeam {
        /// Scope of the degraded series.
        scope: PropertyScope,
        /// Window whose seam could not be reconciled.
        window: DateSpan,
    },
    /// The raw daily total for a month was zero while its coarse weight was
    /// positive; the month was zeroed rather than interpolated.
    ZeroRawMonth {
        /// Scope of the degraded series.
        scope: PropertyScope,
        /// First day of the affected month.
        month: NaiveDate,
    },
    /// The assembled series length differed from the requested day count.
    LengthMismatch {
        /// Scope of the degraded series.
        scope: PropertyScope,
        /// Day count the request asked for.
        expected: usize,
        /// Day count actually assembled.
        actual: usize,
    },
}

impl QualityIssue {
    /// The summary flag this issue contributes.
    #[must_use]
    pub const fn flag(&self) -> QualityFlags {
        match self {
            Self::NoData { .. } => QualityFlags::NO_DATA,
            Self::UnscaledSeam { .. } => QualityFlags::UNSCALED_SEAM,
            Self::ZeroRawMonth { .. } => QualityFlags::ZERO_RAW_MONTH,
            Self::LengthMismatch { .. } => QualityFlags::LENGTH_MISMATCH,
        }
    }
}

/// Fold a list of issues into the summary flag set.
#[must_use]
pub fn summarize(issues: &[QualityIssue]) -> QualityFlags {
    issues
        .iter()
        .fold(QualityFlags::empty(), |acc, i| acc | i.flag())
}
