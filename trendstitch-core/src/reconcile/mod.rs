//! Reconciliation of independently-normalized batches into one series.

pub mod monthly;
pub mod overlap;

pub use monthly::{RescaleOutcome, rescale_to_weights};
pub use overlap::{MergeOutcome, merge_overlap};
