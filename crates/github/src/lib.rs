//! GitHub API client for fetching PRs, reviews and check runs

pub mod client;
pub mod convert;

pub use client::{
    ClientError, GitHubClient, GithubBranch, GithubCheckRun, GithubCheckRuns, GithubPr,
    GithubReview, GithubUser,
};
pub use convert::into_reviews;
