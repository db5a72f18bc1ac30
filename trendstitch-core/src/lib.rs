//! trendstitch-core
//!
//! Core contract and reconciliation algorithms shared across the trendstitch
//! ecosystem.
//!
//! - `provider`: the `InterestProvider` trait and the three-way fetch outcome.
//! - `planner`: query-window planning under the platform's resolution rules.
//! - `reconcile`: overlap seam merging and monthly-weight disaggregation.
//! - `assembler`: the per-request state machine folding batches into a series.
//! - `series`: daily series, batches, and monthly weight containers.
//!
//! Async runtime (Tokio)
//! ---------------------
//! This crate assumes the Tokio ecosystem as the async runtime: the provider
//! trait is an `async_trait` and the assembler applies its per-call timeout
//! via `tokio::time::timeout`. Code driving an assembly must run under a
//! Tokio 1.x runtime.
#![warn(missing_docs)]

/// The per-request assembly state machine.
pub mod assembler;
/// Middleware trait implemented by provider wrappers.
pub mod middleware;
/// Window planning under platform resolution rules.
pub mod planner;
/// The external fetch capability contract.
pub mod provider;
/// Reconciliation of independently-normalized batches.
pub mod reconcile;
/// Daily series and batch containers.
pub mod series;
pub mod types;

pub use assembler::{Assembler, Assembly, AssemblyStats};
pub use middleware::Middleware;
pub use planner::plan;
pub use provider::{FetchOutcome, InterestProvider};
pub use reconcile::{MergeOutcome, RescaleOutcome, merge_overlap, rescale_to_weights};
pub use series::{Batch, DailySeries, MonthlyWeights};
pub use types::*;
