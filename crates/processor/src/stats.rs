//! Portfolio-level statistics

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use common::models::{AlertType, EnrichedPr, ReviewStats};

use crate::aggregate::{
    aging_distribution, average_review_time, average_review_time_by_repo, review_load,
};
use crate::trends::approval_trends;

/// Build one statistics snapshot.
///
/// Totals, averages, the age histogram, reviewer load and alert counts come
/// from `open_prs`; only the approval trend reads `closed_prs`.
pub fn calculate_stats(
    open_prs: &[EnrichedPr],
    closed_prs: &[EnrichedPr],
    trend_window_days: u32,
    now: DateTime<Utc>,
) -> ReviewStats {
    let alerts_by_type = count_alerts(open_prs);

    ReviewStats {
        average_review_time_hours: average_review_time(open_prs),
        average_review_time_by_repo: average_review_time_by_repo(open_prs),
        pr_aging_distribution: aging_distribution(open_prs),
        review_load_by_member: review_load(open_prs),
        approval_trends: approval_trends(closed_prs, trend_window_days, now),
        total_open_prs: open_prs.len(),
        total_alerts: alerts_by_type.values().sum(),
        alerts_by_type,
    }
}

/// Per-tag totals, with every tag present
pub fn count_alerts(prs: &[EnrichedPr]) -> BTreeMap<AlertType, usize> {
    let mut counts: BTreeMap<AlertType, usize> =
        AlertType::ALL.iter().map(|alert| (*alert, 0)).collect();

    for alert in prs.iter().flat_map(|pr| &pr.alerts) {
        *counts.entry(*alert).or_insert(0) += 1;
    }

    counts
}
