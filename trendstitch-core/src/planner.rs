//! Window planning under the platform's resolution rules.
//!
//! The platform returns daily-granularity data in a single call only for
//! ranges starting within a cutoff of "now". Older ranges must be fetched in
//! bounded chunks and reconciled afterwards; the planner chooses the chunking
//! and annotates each window with the overlap the reconciler will need.

use chrono::{Days, Months, NaiveDate};

use crate::StitchError;
use trendstitch_types::{DateSpan, PlannerConfig, Strategy, Window};

/// Produce the ordered fetch windows covering `span`.
///
/// Output is oldest window first; reconciliation folds in this order and must
/// not be invoked with any other ordering.
///
/// # Errors
/// `StitchError::InvalidRange` when `span` is inverted, the planner
/// configuration cannot tile it, or clipping would produce an empty window.
pub fn plan(
    span: DateSpan,
    strategy: Strategy,
    today: NaiveDate,
    cfg: &PlannerConfig,
) -> Result<Vec<Window>, StitchError> {
    if span.start > span.end {
        return Err(StitchError::invalid_range(format!(
            "start {} is after end {}",
            span.start, span.end
        )));
    }

    // Recent enough for a single daily-resolution call.
    let cutoff = today - Days::new(u64::try_from(cfg.daily_cutoff_days).unwrap_or(0));
    if span.start >= cutoff {
        return Ok(vec![Window::daily(span)]);
    }

    match strategy {
        Strategy::Overlap => plan_overlap(span, cfg),
        Strategy::MonthlyWeighted => plan_monthly_weighted(span, cfg),
    }
}

/// Fixed-length daily windows, each advanced by half a window from the
/// previous start, so consecutive windows share half their days.
fn plan_overlap(span: DateSpan, cfg: &PlannerConfig) -> Result<Vec<Window>, StitchError> {
    let len = cfg.window_len_days;
    let step = cfg.overlap_step();
    if len < 2 || step < 1 {
        return Err(StitchError::invalid_range(format!(
            "window length {len} cannot produce an overlap step"
        )));
    }

    let mut windows: Vec<Window> = Vec::new();
    let mut start = span.start;
    loop {
        let natural_end = start + Days::new(u64::try_from(len - 1).unwrap_or(0));
        let end = natural_end.min(span.end);
        if end < start {
            return Err(StitchError::invalid_range(format!(
                "clipping produced an empty window at {start}"
            )));
        }
        let overlap_with_prev = match windows.last() {
            // The final window may be clipped shorter than the configured
            // step; the shared range with its neighbor shrinks with it.
            Some(prev) => {
                let shared = (prev.span.end.min(end) - start).num_days() + 1;
                u32::try_from(shared.max(0)).unwrap_or(0)
            }
            None => 0,
        };
        windows.push(Window {
            span: DateSpan { start, end },
            resolution: trendstitch_types::Resolution::Daily,
            overlap_with_prev,
        });
        if end == span.end {
            break;
        }
        start = start + Days::new(u64::try_from(step).unwrap_or(0));
    }
    Ok(windows)
}

/// One coarse all-time monthly anchor, then fixed-length daily sub-windows
/// tiling the requested span with no gaps and no overlap.
fn plan_monthly_weighted(span: DateSpan, cfg: &PlannerConfig) -> Result<Vec<Window>, StitchError> {
    if span.end < cfg.history_start {
        return Err(StitchError::invalid_range(format!(
            "range {span} ends before platform history starts ({})",
            cfg.history_start
        )));
    }
    if cfg.subwindow_months == 0 {
        return Err(StitchError::invalid_range(
            "sub-window length must be at least one month",
        ));
    }

    let anchor = Window::monthly(DateSpan {
        start: cfg.history_start.min(span.start),
        end: span.end,
    });

    let mut windows = vec![anchor];
    let mut start = span.start;
    while start <= span.end {
        let next_start = start
            .checked_add_months(Months::new(cfg.subwindow_months))
            .ok_or_else(|| {
                StitchError::invalid_range(format!("sub-window overflow past {start}"))
            })?;
        let end = (next_start - Days::new(1)).min(span.end);
        if end < start {
            return Err(StitchError::invalid_range(format!(
                "clipping produced an empty sub-window at {start}"
            )));
        }
        windows.push(Window::daily(DateSpan { start, end }));
        start = end + Days::new(1);
    }
    Ok(windows)
}
