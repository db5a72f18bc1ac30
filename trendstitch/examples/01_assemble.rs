use std::sync::Arc;

use chrono::NaiveDate;
use trendstitch::{DateSpan, InterestRequest, PropertyScope, QueryIdentity, Stitcher, Strategy};
use trendstitch_mock::MockProvider;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build the stitcher over the deterministic mock provider. "Today" is
    //    pinned so the plan is the same on every run.
    let stitcher = Stitcher::builder()
        .with_provider(Arc::new(MockProvider::new()))
        .with_today(day(2024, 1, 15))
        .build()?;

    // 2. A multi-month range: the planner chunks it into overlapping windows
    //    and the assembler stitches the seams back onto one scale.
    let req = InterestRequest {
        identity: QueryIdentity::keyword("rust"),
        span: DateSpan {
            start: day(2023, 1, 1),
            end: day(2023, 6, 30),
        },
        scopes: vec![PropertyScope::Web, PropertyScope::YouTube],
        strategy: Strategy::Overlap,
    };

    let result = stitcher.assemble(&req).await?;
    for series in &result.series {
        let peak = series.values.iter().copied().fold(f64::MIN, f64::max);
        println!(
            "{}: {} days, peak {peak:.1}",
            series.scope.series_name(),
            series.values.len(),
        );
    }
    println!("quality flags: {:?}", result.flags);
    Ok(())
}
