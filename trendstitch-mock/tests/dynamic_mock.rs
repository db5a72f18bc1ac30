use chrono::NaiveDate;
use trendstitch_core::{
    DateSpan, FetchOutcome, InterestProvider, PropertyScope, QueryIdentity, Resolution,
    StitchError, Window,
};
use trendstitch_mock::{DynamicMockProvider, MockBehavior, MockProvider};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn window(start: NaiveDate, end: NaiveDate) -> Window {
    Window::daily(DateSpan { start, end })
}

#[tokio::test]
async fn synthetic_data_is_deterministic_and_window_shaped() {
    let provider = MockProvider::new();
    let identity = QueryIdentity::keyword("rust");
    let w = window(d(2020, 1, 1), d(2020, 1, 30));

    let first = provider
        .fetch(&identity, &w, PropertyScope::Web)
        .await
        .unwrap();
    let second = provider
        .fetch(&identity, &w, PropertyScope::Web)
        .await
        .unwrap();
    let FetchOutcome::Found(a) = first else {
        panic!("expected data")
    };
    let FetchOutcome::Found(b) = second else {
        panic!("expected data")
    };
    assert_eq!(a, b);
    assert_eq!(a.values.len(), 30);
    assert!(a.values.iter().all(|v| (0.0..=100.0).contains(v)));
}

#[tokio::test]
async fn different_scopes_shape_differently() {
    let provider = MockProvider::new();
    let identity = QueryIdentity::keyword("rust");
    let w = window(d(2020, 1, 1), d(2020, 1, 30));

    let FetchOutcome::Found(web) = provider
        .fetch(&identity, &w, PropertyScope::Web)
        .await
        .unwrap()
    else {
        panic!("expected data")
    };
    let FetchOutcome::Found(youtube) = provider
        .fetch(&identity, &w, PropertyScope::YouTube)
        .await
        .unwrap()
    else {
        panic!("expected data")
    };
    assert_ne!(web.values, youtube.values);
}

#[tokio::test]
async fn magic_keywords_force_failure_paths() {
    let provider = MockProvider::new();
    let w = window(d(2020, 1, 1), d(2020, 1, 30));

    let err = provider
        .fetch(&QueryIdentity::keyword("FAIL"), &w, PropertyScope::Web)
        .await
        .unwrap_err();
    assert!(matches!(err, StitchError::Provider { .. }));

    let err = provider
        .fetch(&QueryIdentity::keyword("UNAVAILABLE"), &w, PropertyScope::Web)
        .await
        .unwrap_err();
    assert!(matches!(err, StitchError::ProviderUnavailable { .. }));

    let outcome = provider
        .fetch(&QueryIdentity::keyword("NODATA"), &w, PropertyScope::Web)
        .await
        .unwrap();
    assert!(matches!(outcome, FetchOutcome::NoData));
}

#[tokio::test]
async fn scripted_rules_override_the_synthetic_default() {
    let (provider, controller) = DynamicMockProvider::new();
    let identity = QueryIdentity::keyword("rust");
    let w = window(d(2020, 1, 1), d(2020, 1, 3));

    controller
        .set_fetch_behavior(
            w.span.start,
            Resolution::Daily,
            PropertyScope::Web,
            MockBehavior::Return(vec![1.0, 2.0, 3.0]),
        )
        .await;

    let FetchOutcome::Found(batch) = provider
        .fetch(&identity, &w, PropertyScope::Web)
        .await
        .unwrap()
    else {
        panic!("expected data")
    };
    assert_eq!(batch.values, vec![1.0, 2.0, 3.0]);

    // Same window under an unscripted scope still gets synthetic data.
    let FetchOutcome::Found(batch) = provider
        .fetch(&identity, &w, PropertyScope::News)
        .await
        .unwrap()
    else {
        panic!("expected data")
    };
    assert_eq!(batch.values.len(), 3);

    let calls = controller.calls().await;
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].term, "rust");
    assert_eq!(calls[0].scope, PropertyScope::Web);
    assert_eq!(calls[1].scope, PropertyScope::News);
}
