//! Batch feed runner.
//!
//! A feed run assembles one output record per input record, up to
//! `concurrency` at a time. Each request is an independent assembly; the only
//! cross-request coordination is the halt flag raised on a fatal provider
//! condition, which stops admitting new work while every record completed so
//! far is kept.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::StreamExt;
use futures::stream::FuturesUnordered;

use crate::core::Stitcher;
use trendstitch_core::{Assembly, StitchError};
use trendstitch_types::{
    DateSpan, FeedRecord, InterestRequest, OutputRecord, RunMetrics, RunReport,
};

/// Parse a JSON-lines feed into records. Blank lines are ignored.
///
/// # Errors
/// Returns `InvalidRequest` naming the offending line number when a line is
/// not a valid feed record.
pub fn parse_feed(input: &str) -> Result<Vec<FeedRecord>, StitchError> {
    let mut records = Vec::new();
    for (i, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: FeedRecord = serde_json::from_str(line).map_err(|e| {
            StitchError::invalid_request(format!("feed line {}: {e}", i + 1))
        })?;
        records.push(record);
    }
    Ok(records)
}

enum TaskOutcome {
    Done(Box<FeedRecord>, Box<Assembly>),
    Failed(String, StitchError),
    Abandoned,
}

impl Stitcher {
    /// Run a batch feed: one output record per input record, in completion
    /// order.
    ///
    /// Records whose keyword is in `done_ids` are skipped, so a caller that
    /// persists output records between runs resumes where it left off. A
    /// fatal provider condition (`ProviderUnavailable`) halts admission of
    /// further records; everything completed before the halt is returned with
    /// `halted = true`. Per-record failures of any other kind are collected
    /// and never stop the run.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, records, done_ids), fields(records = records.len()))
    )]
    pub async fn run_feed(&self, records: Vec<FeedRecord>, done_ids: &HashSet<String>) -> RunReport {
        let mut metrics = RunMetrics::default();
        let halt = Arc::new(AtomicBool::new(false));

        let mut pending = Vec::new();
        for record in records {
            if done_ids.contains(&record.keyword) {
                #[cfg(feature = "tracing")]
                tracing::debug!(keyword = %record.keyword, "already done; skipping");
                metrics.requests_skipped += 1;
            } else {
                pending.push(record);
            }
        }

        let mut tasks = FuturesUnordered::new();
        let mut queue = pending.into_iter();
        let mut out = Vec::new();
        let mut failures: Vec<(String, StitchError)> = Vec::new();

        loop {
            while tasks.len() < self.cfg.concurrency.max(1) {
                let Some(record) = queue.next() else { break };
                tasks.push(self.run_record(record, Arc::clone(&halt)));
            }
            let Some(outcome) = tasks.next().await else {
                break;
            };
            match outcome {
                TaskOutcome::Done(record, assembly) => {
                    metrics.requests_completed += 1;
                    metrics.windows_fetched += assembly.stats.windows_fetched;
                    metrics.windows_no_data += assembly.stats.windows_no_data;
                    out.push(OutputRecord::from_result(*record, &assembly.result));
                }
                TaskOutcome::Failed(keyword, err) => {
                    metrics.requests_failed += 1;
                    if err.is_fatal_for_run() {
                        #[cfg(feature = "tracing")]
                        tracing::error!(%keyword, %err, "fatal provider condition; halting run");
                        halt.store(true, Ordering::SeqCst);
                    }
                    failures.push((keyword, err));
                }
                TaskOutcome::Abandoned => {
                    metrics.requests_abandoned += 1;
                }
            }
        }

        RunReport {
            records: out,
            failures,
            halted: halt.load(Ordering::SeqCst),
            metrics,
        }
    }

    async fn run_record(&self, record: FeedRecord, halt: Arc<AtomicBool>) -> TaskOutcome {
        if halt.load(Ordering::SeqCst) {
            return TaskOutcome::Abandoned;
        }
        let req = InterestRequest {
            identity: record.identity(),
            span: DateSpan {
                start: record.start_date,
                end: record.end_date,
            },
            scopes: record.scopes.clone(),
            strategy: self.cfg.strategy,
        };
        match self.assemble_with_stats(&req).await {
            Ok(assembly) => TaskOutcome::Done(Box::new(record), Box::new(assembly)),
            Err(err) => TaskOutcome::Failed(record.keyword, err),
        }
    }
}
