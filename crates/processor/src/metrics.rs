//! Metrics computation

use chrono::{DateTime, Utc};
use common::models::Review;

/// Whole days and whole hours a PR has been open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age {
    pub days: i64,
    pub hours: i64,
}

/// Hours from PR creation to the first substantive review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeInReview {
    pub hours: Option<i64>,
    pub first_review_at: Option<DateTime<Utc>>,
}

/// Age of a PR at `now`, truncated toward zero.
///
/// A `created_at` after `now` yields negative values; bad timestamps are
/// surfaced rather than clamped.
pub fn age_of(created_at: DateTime<Utc>, now: DateTime<Utc>) -> Age {
    let elapsed = now - created_at;
    Age {
        days: elapsed.num_days(),
        hours: elapsed.num_hours(),
    }
}

/// Time until the earliest approval or change request.
///
/// Comments, dismissals and pending reviews are ignored. Among reviews with
/// the same timestamp the first one listed wins.
pub fn time_in_review(created_at: DateTime<Utc>, reviews: &[Review]) -> TimeInReview {
    let first = reviews
        .iter()
        .filter(|r| r.state.is_substantive())
        .min_by_key(|r| r.submitted_at);

    match first {
        Some(review) => TimeInReview {
            hours: Some((review.submitted_at - created_at).num_hours()),
            first_review_at: Some(review.submitted_at),
        },
        None => TimeInReview::default(),
    }
}
