use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use trendstitch_core::{DateSpan, PlannerConfig, Resolution, StitchError, Strategy, plan};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn span(start: NaiveDate, end: NaiveDate) -> DateSpan {
    DateSpan { start, end }
}

fn today() -> NaiveDate {
    d(2018, 3, 31)
}

#[test]
fn recent_start_yields_single_daily_window() {
    let cfg = PlannerConfig::default();
    let s = span(d(2018, 1, 1), d(2018, 3, 1));
    for strategy in [Strategy::Overlap, Strategy::MonthlyWeighted] {
        let windows = plan(s, strategy, today(), &cfg).unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].span, s);
        assert_eq!(windows[0].resolution, Resolution::Daily);
        assert_eq!(windows[0].overlap_with_prev, 0);
    }
}

#[test]
fn inverted_range_is_rejected() {
    let cfg = PlannerConfig::default();
    let err = plan(
        span(d(2016, 2, 1), d(2016, 1, 1)),
        Strategy::Overlap,
        today(),
        &cfg,
    )
    .unwrap_err();
    assert!(matches!(err, StitchError::InvalidRange(_)));
}

#[test]
fn window_too_short_for_overlap_step_is_rejected() {
    let cfg = PlannerConfig {
        window_len_days: 1,
        ..PlannerConfig::default()
    };
    let err = plan(
        span(d(2016, 1, 1), d(2016, 6, 1)),
        Strategy::Overlap,
        today(),
        &cfg,
    )
    .unwrap_err();
    assert!(matches!(err, StitchError::InvalidRange(_)));
}

#[test]
fn overlap_windows_slide_by_half_and_clip_to_end() {
    let cfg = PlannerConfig::default(); // 30-day windows, 15-day step
    let s = span(d(2016, 1, 1), d(2016, 3, 15)); // 75 days, older than cutoff
    let windows = plan(s, Strategy::Overlap, today(), &cfg).unwrap();

    assert_eq!(windows[0].span.start, s.start);
    assert_eq!(windows.last().unwrap().span.end, s.end);
    for pair in windows.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        assert_eq!(cur.span.start, prev.span.start + Days::new(15));
        assert_eq!(cur.overlap_with_prev, 15);
        // No gap: every window starts inside its predecessor.
        assert!(cur.span.start <= prev.span.end);
    }
    for w in &windows {
        assert_eq!(w.resolution, Resolution::Daily);
        assert!(w.span.days() <= 30);
    }
}

#[test]
fn monthly_plan_has_anchor_then_tiling_subwindows() {
    let cfg = PlannerConfig {
        history_start: d(2010, 1, 1),
        ..PlannerConfig::default()
    };
    let s = span(d(2016, 1, 10), d(2017, 2, 20));
    let windows = plan(s, Strategy::MonthlyWeighted, today(), &cfg).unwrap();

    let anchor = &windows[0];
    assert_eq!(anchor.resolution, Resolution::Monthly);
    assert_eq!(anchor.span.start, d(2010, 1, 1));
    assert_eq!(anchor.span.end, s.end);

    let subs = &windows[1..];
    assert!(!subs.is_empty());
    assert_eq!(subs[0].span.start, s.start);
    assert_eq!(subs.last().unwrap().span.end, s.end);
    for pair in subs.windows(2) {
        // Tiling: no gaps, no overlap.
        assert_eq!(pair[1].span.start, pair[0].span.end + Days::new(1));
        assert_eq!(pair[1].overlap_with_prev, 0);
    }
    for w in subs {
        assert_eq!(w.resolution, Resolution::Daily);
    }
}

proptest! {
    #[test]
    fn overlap_windows_cover_span_exactly(
        start_off in 0i64..2000,
        len in 1i64..500,
    ) {
        let cfg = PlannerConfig::default();
        let start = d(2008, 1, 1) + Days::new(start_off as u64);
        let end = start + Days::new((len - 1) as u64);
        let windows = plan(span(start, end), Strategy::Overlap, today(), &cfg).unwrap();

        prop_assert_eq!(windows[0].span.start, start);
        prop_assert_eq!(windows.last().unwrap().span.end, end);
        // Union covers the span with no gaps.
        let mut covered_until = windows[0].span.end;
        for w in &windows[1..] {
            prop_assert!(w.span.start <= covered_until + Days::new(1));
            prop_assert!(w.span.end > covered_until);
            // Declared overlap matches actual shared days with the neighbor.
            let shared = (covered_until - w.span.start).num_days() + 1;
            prop_assert_eq!(i64::from(w.overlap_with_prev), shared);
            covered_until = w.span.end;
        }
        prop_assert_eq!(covered_until, end);
    }

    #[test]
    fn monthly_subwindows_tile_span_exactly(
        start_off in 0i64..2000,
        len in 1i64..900,
        sub_months in 1u32..9,
    ) {
        let cfg = PlannerConfig {
            history_start: d(2004, 1, 1),
            subwindow_months: sub_months,
            ..PlannerConfig::default()
        };
        let start = d(2008, 1, 1) + Days::new(start_off as u64);
        let end = start + Days::new((len - 1) as u64);
        let windows = plan(span(start, end), Strategy::MonthlyWeighted, today(), &cfg).unwrap();

        prop_assert_eq!(windows[0].resolution, Resolution::Monthly);
        let subs = &windows[1..];
        prop_assert_eq!(subs[0].span.start, start);
        prop_assert_eq!(subs.last().unwrap().span.end, end);
        let mut expect_start = start;
        for w in subs {
            prop_assert_eq!(w.span.start, expect_start);
            expect_start = w.span.end + Days::new(1);
        }
        prop_assert_eq!(expect_start, end + Days::new(1));
    }
}
