use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use trendstitch::{
    CacheConfig, CacheMiddleware, DateSpan, InterestRequest, PacerConfig, PacerMiddleware,
    PropertyScope, QueryIdentity, Stitcher, Strategy,
};
use trendstitch_mock::MockProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Cache outermost, pacer inside: a cache hit never consumes a pacing slot.
    let stitcher = Stitcher::builder()
        .with_provider(Arc::new(MockProvider::new()))
        .with_middleware(Box::new(CacheMiddleware::new(CacheConfig::default())))
        .with_middleware(Box::new(PacerMiddleware::new(PacerConfig {
            min_interval: Duration::from_millis(100),
        })))
        .with_today(NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"))
        .build()?;

    for layer in &stitcher.middleware().layers {
        println!("layer: {} {}", layer.name, layer.config);
    }

    let req = InterestRequest {
        identity: QueryIdentity::keyword("rust"),
        span: DateSpan {
            start: NaiveDate::from_ymd_opt(2023, 11, 1).expect("valid date"),
            end: NaiveDate::from_ymd_opt(2023, 12, 31).expect("valid date"),
        },
        scopes: vec![PropertyScope::Web],
        strategy: Strategy::Overlap,
    };

    let started = std::time::Instant::now();
    stitcher.assemble(&req).await?;
    let cold = started.elapsed();

    // The second run replays the memoized fetches and skips the pacer waits.
    let started = std::time::Instant::now();
    stitcher.assemble(&req).await?;
    let warm = started.elapsed();

    println!("cold run {cold:?}, warm run {warm:?}");
    Ok(())
}
