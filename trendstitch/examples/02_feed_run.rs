use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use trendstitch::{Stitcher, Strategy, parse_feed};
use trendstitch_mock::MockProvider;

const FEED: &str = r#"
{"keyword": "rust", "start_date": "2023-01-01", "end_date": "2023-03-31"}
{"keyword": "go", "mid": "/m/01yb0", "start_date": "2023-01-01", "end_date": "2023-03-31"}
{"keyword": "zig", "start_date": "2023-01-01", "end_date": "2023-03-31", "scopes": ["web", "youtube"]}
"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let stitcher = Stitcher::builder()
        .with_provider(Arc::new(MockProvider::new()))
        .with_today(NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"))
        .strategy(Strategy::Overlap)
        .concurrency(2)
        .build()?;

    let records = parse_feed(FEED)?;

    // Pretend "go" was completed by an earlier run; it is skipped.
    let done: HashSet<String> = ["go".to_string()].into();
    let report = stitcher.run_feed(records, &done).await;

    for record in &report.records {
        println!(
            "{}: {} series, flags {:?}",
            record.feed.keyword,
            record.trends.series.len(),
            record.flags(),
        );
    }
    println!(
        "completed {}, skipped {}, failed {}, abandoned {}, halted {}",
        report.metrics.requests_completed,
        report.metrics.requests_skipped,
        report.metrics.requests_failed,
        report.metrics.requests_abandoned,
        report.halted,
    );
    Ok(())
}
