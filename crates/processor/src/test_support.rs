//! Builders for enriched PRs, reviews and check runs used across tests

use std::collections::BTreeSet;

use chrono::{DateTime, TimeZone, Utc};
use common::models::{
    AlertType, BranchRef, CheckConclusion, CheckRun, CheckStatus, EnrichedPr, PrState,
    PullRequest, Review, ReviewState, ReviewStatus, User,
};

pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

pub fn user(login: &str) -> User {
    User {
        login: login.to_string(),
        avatar_url: format!("https://avatars.githubusercontent.com/{}", login),
    }
}

pub fn make_pull_request() -> PullRequest {
    PullRequest {
        id: 1,
        number: 42,
        title: "Fix login bug".to_string(),
        html_url: "https://github.com/acme/app/pull/42".to_string(),
        state: PrState::Open,
        created_at: at(2026, 2, 1, 10, 0),
        updated_at: at(2026, 2, 5, 10, 0),
        user: user("alice"),
        requested_reviewers: vec![user("bob")],
        head: BranchRef {
            ref_name: "fix-login".to_string(),
            sha: "abc123".to_string(),
        },
        base: BranchRef {
            ref_name: "main".to_string(),
            sha: "def456".to_string(),
        },
        comments: 0,
    }
}

/// An open PR in acme/app, five days old, one requested reviewer, no alerts
pub fn make_pr() -> EnrichedPr {
    EnrichedPr {
        pr: make_pull_request(),
        repository: "app".to_string(),
        owner: "acme".to_string(),
        age_in_days: 5,
        age_in_hours: 120,
        time_in_review_hours: Some(24),
        first_review_at: Some(at(2026, 2, 2, 10, 0)),
        review_status: ReviewStatus::Pending,
        reviews: Vec::new(),
        checks: Vec::new(),
        alerts: BTreeSet::new(),
    }
}

pub fn make_review(login: &str, state: ReviewState, submitted_at: DateTime<Utc>) -> Review {
    Review {
        id: 1,
        user: user(login),
        state,
        submitted_at,
    }
}

pub fn make_check(status: CheckStatus, conclusion: Option<CheckConclusion>) -> CheckRun {
    CheckRun {
        status,
        conclusion,
        name: "ci".to_string(),
    }
}

pub fn alerts(tags: &[AlertType]) -> BTreeSet<AlertType> {
    tags.iter().copied().collect()
}
