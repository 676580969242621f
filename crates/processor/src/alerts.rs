//! Alert classification for open PRs

use std::collections::BTreeSet;

use common::models::{AlertType, EnrichedPr, ReviewStatus};

/// PRs open longer than this many days are stale
pub const STALE_AFTER_DAYS: i64 = 3;

/// Evaluate every alert rule against a PR.
///
/// Rules are independent, so a PR can carry any combination of tags. Pending
/// CI (queued or in progress) raises nothing.
pub fn identify_alerts(pr: &EnrichedPr) -> BTreeSet<AlertType> {
    let mut alerts = BTreeSet::new();

    if pr.age_in_days > STALE_AFTER_DAYS {
        alerts.insert(AlertType::Stale);
    }

    if pr.pr.requested_reviewers.is_empty() {
        alerts.insert(AlertType::NoReviewers);
    }

    if pr.checks.iter().any(|check| check.is_failure()) {
        alerts.insert(AlertType::FailingCi);
    }

    if has_unaddressed_changes(pr) {
        alerts.insert(AlertType::ChangesRequested);
    }

    alerts
}

/// Changes were requested and the PR hasn't been touched since the latest review
fn has_unaddressed_changes(pr: &EnrichedPr) -> bool {
    if pr.review_status != ReviewStatus::ChangesRequested {
        return false;
    }

    pr.reviews
        .iter()
        .map(|r| r.submitted_at)
        .max()
        .map(|last_review_at| pr.pr.updated_at < last_review_at)
        .unwrap_or(false)
}
