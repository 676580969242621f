//! Conversion of GitHub API payloads into domain models

use common::models::{
    BranchRef, CheckConclusion, CheckRun, CheckStatus, PrState, PullRequest, Review, ReviewState,
    User,
};

use crate::client::{GithubBranch, GithubCheckRun, GithubPr, GithubReview, GithubUser};

impl From<GithubUser> for User {
    fn from(user: GithubUser) -> Self {
        User {
            login: user.login,
            avatar_url: user.avatar_url.unwrap_or_default(),
        }
    }
}

impl From<GithubBranch> for BranchRef {
    fn from(branch: GithubBranch) -> Self {
        BranchRef {
            ref_name: branch.ref_name,
            sha: branch.sha,
        }
    }
}

impl From<GithubPr> for PullRequest {
    fn from(pr: GithubPr) -> Self {
        let state = if pr.state == "closed" {
            PrState::Closed
        } else {
            PrState::Open
        };

        PullRequest {
            id: pr.id,
            number: pr.number,
            title: pr.title,
            html_url: pr.html_url,
            state,
            created_at: pr.created_at,
            updated_at: pr.updated_at,
            user: pr.user.into(),
            requested_reviewers: pr.requested_reviewers.into_iter().map(User::from).collect(),
            head: pr.head.into(),
            base: pr.base.into(),
            comments: pr.comments.unwrap_or(0),
        }
    }
}

impl From<GithubCheckRun> for CheckRun {
    fn from(run: GithubCheckRun) -> Self {
        let status = match run.status.as_str() {
            "queued" => CheckStatus::Queued,
            "in_progress" => CheckStatus::InProgress,
            "completed" => CheckStatus::Completed,
            _ => CheckStatus::Other,
        };
        let conclusion = run.conclusion.as_deref().map(|c| match c {
            "success" => CheckConclusion::Success,
            "failure" => CheckConclusion::Failure,
            "neutral" => CheckConclusion::Neutral,
            "cancelled" => CheckConclusion::Cancelled,
            "timed_out" => CheckConclusion::TimedOut,
            "action_required" => CheckConclusion::ActionRequired,
            _ => CheckConclusion::Other,
        });

        CheckRun {
            status,
            conclusion,
            name: run.name,
        }
    }
}

/// Parse a GitHub review state
pub fn parse_review_state(state: &str) -> ReviewState {
    match state.to_uppercase().as_str() {
        "APPROVED" => ReviewState::Approved,
        "CHANGES_REQUESTED" => ReviewState::ChangesRequested,
        "COMMENTED" => ReviewState::Commented,
        "DISMISSED" => ReviewState::Dismissed,
        _ => ReviewState::Pending,
    }
}

impl GithubReview {
    /// Reviews by deleted (ghost) accounts and unsubmitted drafts are dropped
    pub fn into_review(self) -> Option<Review> {
        let user = self.user?;
        let submitted_at = self.submitted_at?;

        Some(Review {
            id: self.id,
            user: user.into(),
            state: parse_review_state(&self.state),
            submitted_at,
        })
    }
}

/// Convert a review listing, skipping reviews that cannot be attributed
pub fn into_reviews(reviews: Vec<GithubReview>) -> Vec<Review> {
    reviews
        .into_iter()
        .filter_map(GithubReview::into_review)
        .collect()
}
