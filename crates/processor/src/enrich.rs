//! Turn raw GitHub records into enriched PRs

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use common::models::{CheckRun, EnrichedPr, PullRequest, Repository, Review};

use crate::alerts::identify_alerts;
use crate::metrics::{age_of, time_in_review};
use crate::review_status::review_status;

/// Compute metrics, review status and alerts for one PR.
///
/// `now` should be read once per pass so every PR is aged against the same
/// instant.
pub fn enrich_pr(
    repo: &Repository,
    pr: PullRequest,
    reviews: Vec<Review>,
    checks: Vec<CheckRun>,
    now: DateTime<Utc>,
) -> EnrichedPr {
    let age = age_of(pr.created_at, now);
    let in_review = time_in_review(pr.created_at, &reviews);
    let status = review_status(&reviews);

    let mut enriched = EnrichedPr {
        pr,
        repository: repo.name.clone(),
        owner: repo.owner.clone(),
        age_in_days: age.days,
        age_in_hours: age.hours,
        time_in_review_hours: in_review.hours,
        first_review_at: in_review.first_review_at,
        review_status: status,
        reviews,
        checks,
        alerts: BTreeSet::new(),
    };
    enriched.alerts = identify_alerts(&enriched);
    enriched
}
