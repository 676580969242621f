//! Domain models

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A tracked GitHub repository
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// "owner/name"
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for Repository {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split('/').collect::<Vec<_>>().as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => {
                Ok(Repository::new(*owner, *name))
            }
            _ => Err(Error::InvalidRepository(s.to_string())),
        }
    }
}

/// A GitHub user as embedded in PRs and reviews
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}

/// A branch reference on either side of a PR
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BranchRef {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub sha: String,
}

/// A pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: i64,
    pub number: u64,
    pub title: String,
    pub html_url: String,
    pub state: PrState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: User,
    #[serde(default)]
    pub requested_reviewers: Vec<User>,
    pub head: BranchRef,
    pub base: BranchRef,
    #[serde(default)]
    pub comments: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    Open,
    Closed,
}

/// A PR review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub user: User,
    pub state: ReviewState,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
    Pending,
}

impl ReviewState {
    /// Approvals and change requests; comments and dismissals don't count
    pub fn is_substantive(self) -> bool {
        matches!(self, ReviewState::Approved | ReviewState::ChangesRequested)
    }
}

/// A CI check run on the PR head commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRun {
    pub status: CheckStatus,
    pub conclusion: Option<CheckConclusion>,
    pub name: String,
}

impl CheckRun {
    pub fn is_failure(&self) -> bool {
        self.status == CheckStatus::Completed && self.conclusion == Some(CheckConclusion::Failure)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Queued,
    InProgress,
    Completed,
    /// waiting, requested, pending
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CheckConclusion {
    Success,
    Failure,
    Neutral,
    Cancelled,
    TimedOut,
    ActionRequired,
    /// skipped, stale
    #[serde(other)]
    Other,
}

/// Review status of a PR, derived from its reviews
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Approved,
    ChangesRequested,
    Pending,
    NoReviews,
}

/// Alert raised on an open PR
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// Open more than 3 days
    Stale,
    /// Nobody requested to review
    NoReviewers,
    /// A completed check run failed
    FailingCi,
    /// Changes requested and not yet addressed
    ChangesRequested,
}

impl AlertType {
    pub const ALL: [AlertType; 4] = [
        AlertType::Stale,
        AlertType::NoReviewers,
        AlertType::FailingCi,
        AlertType::ChangesRequested,
    ];
}

/// A PR with computed metrics and alerts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPr {
    #[serde(flatten)]
    pub pr: PullRequest,
    pub repository: String,
    pub owner: String,
    pub age_in_days: i64,
    pub age_in_hours: i64,
    pub time_in_review_hours: Option<i64>,
    pub first_review_at: Option<DateTime<Utc>>,
    pub review_status: ReviewStatus,
    pub reviews: Vec<Review>,
    pub checks: Vec<CheckRun>,
    pub alerts: BTreeSet<AlertType>,
}

impl EnrichedPr {
    pub fn author(&self) -> &str {
        &self.pr.user.login
    }

    pub fn is_requested_reviewer(&self, login: &str) -> bool {
        self.pr.requested_reviewers.iter().any(|r| r.login == login)
    }
}

/// PR counts by age
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AgingDistribution {
    pub less_than_one_day: usize,
    pub one_to_three_days: usize,
    pub three_to_seven_days: usize,
    pub more_than_seven_days: usize,
}

impl AgingDistribution {
    pub fn total(&self) -> usize {
        self.less_than_one_day
            + self.one_to_three_days
            + self.three_to_seven_days
            + self.more_than_seven_days
    }
}

/// One day of the approval trend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalTrend {
    pub date: NaiveDate,
    pub average_approval_time: f64,
    pub total_approved: usize,
}

/// Portfolio-level review statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub average_review_time_hours: f64,
    pub average_review_time_by_repo: BTreeMap<String, f64>,
    pub pr_aging_distribution: AgingDistribution,
    pub review_load_by_member: BTreeMap<String, usize>,
    pub approval_trends: Vec<ApprovalTrend>,
    #[serde(rename = "totalOpenPRs")]
    pub total_open_prs: usize,
    pub total_alerts: usize,
    pub alerts_by_type: BTreeMap<AlertType, usize>,
}
