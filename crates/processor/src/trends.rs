//! Daily approval trends over closed PRs

use chrono::{DateTime, Days, NaiveDate, Utc};
use common::models::{ApprovalTrend, EnrichedPr, ReviewStatus};

/// One entry per calendar day (UTC), oldest first, ending on `now`'s date.
///
/// A PR counts on the day it was last updated, if its reviews ended approved.
/// Unlike the open-PR averages, a missing time-in-review counts as 0 hours
/// here instead of being skipped.
///
/// Days before chrono's earliest representable date are left out, so the
/// result is shorter than `window_days` only for windows reaching past it.
/// Callers cap the window at `common::MAX_TREND_WINDOW_DAYS`.
pub fn approval_trends(
    closed_prs: &[EnrichedPr],
    window_days: u32,
    now: DateTime<Utc>,
) -> Vec<ApprovalTrend> {
    let today = now.date_naive();

    (0..window_days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset as u64)))
        .map(|date| day_trend(closed_prs, date))
        .collect()
}

fn day_trend(closed_prs: &[EnrichedPr], date: NaiveDate) -> ApprovalTrend {
    let approved: Vec<&EnrichedPr> = closed_prs
        .iter()
        .filter(|pr| pr.pr.updated_at.date_naive() == date)
        .filter(|pr| pr.review_status == ReviewStatus::Approved)
        .collect();

    let total_approved = approved.len();
    let average_approval_time = if total_approved == 0 {
        0.0
    } else {
        let sum: i64 = approved
            .iter()
            .map(|pr| pr.time_in_review_hours.unwrap_or(0))
            .sum();
        sum as f64 / total_approved as f64
    };

    ApprovalTrend {
        date,
        average_approval_time,
        total_approved,
    }
}
