use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::time::Instant;
use trendstitch_core::{DateSpan, InterestProvider, PropertyScope, QueryIdentity, Window};
use trendstitch_middleware::PacedProvider;
use trendstitch_mock::MockProvider;
use trendstitch_types::PacerConfig;

fn window(day: u32) -> Window {
    let start = NaiveDate::from_ymd_opt(2020, 1, day).unwrap();
    Window::daily(DateSpan { start, end: start })
}

fn paced(min_interval: Duration) -> PacedProvider {
    PacedProvider::new(Arc::new(MockProvider::new()), PacerConfig { min_interval })
}

#[tokio::test(start_paused = true)]
async fn first_call_is_not_delayed() {
    let provider = paced(Duration::from_millis(500));
    let started = Instant::now();
    provider
        .fetch(&QueryIdentity::keyword("rust"), &window(1), PropertyScope::Web)
        .await
        .unwrap();
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn sequential_calls_are_spaced_by_the_minimum_interval() {
    let provider = paced(Duration::from_millis(500));
    let started = Instant::now();
    for day in 1..=3 {
        provider
            .fetch(
                &QueryIdentity::keyword("rust"),
                &window(day),
                PropertyScope::Web,
            )
            .await
            .unwrap();
    }
    // Three calls claim slots at 0ms, 500ms, and 1000ms.
    assert!(started.elapsed() >= Duration::from_millis(1000));
}

#[tokio::test(start_paused = true)]
async fn concurrent_calls_share_one_admission_schedule() {
    let provider = Arc::new(paced(Duration::from_millis(500)));
    let started = Instant::now();
    let mut handles = Vec::new();
    for day in 1..=3 {
        let provider = Arc::clone(&provider);
        handles.push(tokio::spawn(async move {
            provider
                .fetch(
                    &QueryIdentity::keyword("rust"),
                    &window(day),
                    PropertyScope::Web,
                )
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert!(started.elapsed() >= Duration::from_millis(1000));
}
