//! Review status reduction

use std::collections::HashMap;

use common::models::{Review, ReviewState, ReviewStatus};

/// Latest review of each reviewer, keyed by login.
///
/// A later review only replaces the kept one when strictly newer, so equal
/// timestamps keep the first encountered.
pub fn latest_review_per_reviewer(reviews: &[Review]) -> HashMap<&str, &Review> {
    reviews
        .iter()
        .fold(HashMap::<&str, &Review>::new(), |mut latest, review| {
            latest
                .entry(review.user.login.as_str())
                .and_modify(|kept| {
                    if review.submitted_at > kept.submitted_at {
                        *kept = review;
                    }
                })
                .or_insert(review);
            latest
        })
}

/// Collapse a review history into a single status.
///
/// Each reviewer's most recent verdict overrides their earlier ones, and an
/// outstanding change request from anyone outranks any number of approvals.
pub fn review_status(reviews: &[Review]) -> ReviewStatus {
    if reviews.is_empty() {
        return ReviewStatus::NoReviews;
    }

    let latest = latest_review_per_reviewer(reviews);

    if latest
        .values()
        .any(|r| r.state == ReviewState::ChangesRequested)
    {
        ReviewStatus::ChangesRequested
    } else if latest.values().any(|r| r.state == ReviewState::Approved) {
        ReviewStatus::Approved
    } else {
        ReviewStatus::Pending
    }
}
