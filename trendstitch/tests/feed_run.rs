use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use trendstitch::{QualityFlags, Stitcher, StitchError, parse_feed};
use trendstitch_mock::MockProvider;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn stitcher(concurrency: usize) -> Stitcher {
    Stitcher::builder()
        .with_provider(Arc::new(MockProvider::new()))
        .with_today(d(2020, 1, 15))
        .concurrency(concurrency)
        .build()
        .unwrap()
}

fn feed(keywords: &[&str]) -> Vec<trendstitch::FeedRecord> {
    let lines: String = keywords
        .iter()
        .map(|kw| {
            format!(r#"{{"keyword": "{kw}", "start_date": "2020-01-01", "end_date": "2020-01-10"}}"#)
        })
        .collect::<Vec<_>>()
        .join("\n");
    parse_feed(&lines).unwrap()
}

#[tokio::test]
async fn completed_records_carry_named_series() {
    let report = stitcher(2).run_feed(feed(&["rust"]), &HashSet::new()).await;
    assert_eq!(report.records.len(), 1);
    assert!(!report.halted);

    let record = &report.records[0];
    assert_eq!(record.feed.keyword, "rust");
    assert_eq!(record.trends.series["web_interest"].len(), 10);
    assert_eq!(record.flags(), QualityFlags::empty());
    assert_eq!(report.metrics.requests_completed, 1);
    assert_eq!(report.metrics.windows_fetched, 1);
}

#[tokio::test]
async fn done_records_are_skipped_on_resume() {
    let done: HashSet<String> = ["rust".to_string()].into();
    let report = stitcher(2).run_feed(feed(&["rust", "go"]), &done).await;

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].feed.keyword, "go");
    assert_eq!(report.metrics.requests_skipped, 1);
    assert_eq!(report.metrics.requests_completed, 1);
}

#[tokio::test]
async fn per_record_failures_do_not_stop_the_run() {
    let report = stitcher(1)
        .run_feed(feed(&["FAIL", "rust"]), &HashSet::new())
        .await;

    assert!(!report.halted);
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].feed.keyword, "rust");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, "FAIL");
    assert!(matches!(report.failures[0].1, StitchError::Provider { .. }));
    assert_eq!(report.metrics.requests_failed, 1);
}

#[tokio::test]
async fn an_unavailable_provider_halts_but_keeps_completed_work() {
    let report = stitcher(1)
        .run_feed(feed(&["rust", "UNAVAILABLE", "go"]), &HashSet::new())
        .await;

    assert!(report.halted);
    // The record completed before the halt is preserved; the one queued
    // behind the fatal failure is never admitted.
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].feed.keyword, "rust");
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        report.failures[0].1,
        StitchError::ProviderUnavailable { .. }
    ));
    assert_eq!(report.metrics.requests_completed, 1);
    assert_eq!(report.metrics.requests_failed, 1);
    assert_eq!(report.metrics.requests_abandoned, 1);
}

#[tokio::test]
async fn malformed_feed_lines_are_rejected_with_their_line_number() {
    let err = parse_feed("{\"keyword\": \"rust\"}\n").unwrap_err();
    let StitchError::InvalidRequest(msg) = err else {
        panic!("expected invalid request");
    };
    assert!(msg.contains("line 1"), "unexpected message: {msg}");
}
