//! GitHub REST API client for fetching PRs, reviews and check runs

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const PER_PAGE: u32 = 100;
const MAX_PAGES: u32 = 10;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Rate limited, retry after {retry_after} seconds")]
    RateLimited { retry_after: u64 },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("GitHub API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// GitHub API client
#[derive(Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    token: Option<String>,
    api_url: String,
}

/// PR as returned by GitHub API
#[derive(Debug, Deserialize)]
pub struct GithubPr {
    pub id: i64,
    pub number: u64,
    pub title: String,
    pub html_url: String,
    pub state: String,
    pub user: GithubUser,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub requested_reviewers: Vec<GithubUser>,
    pub head: GithubBranch,
    pub base: GithubBranch,
    /// Only present on the single-PR endpoint
    pub comments: Option<u64>,
}

/// Head or base of a PR
#[derive(Debug, Deserialize)]
pub struct GithubBranch {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub sha: String,
}

/// Review as returned by GitHub API
#[derive(Debug, Deserialize)]
pub struct GithubReview {
    pub id: i64,
    pub user: Option<GithubUser>,
    pub state: String,
    pub submitted_at: Option<DateTime<Utc>>,
}

/// User as returned by GitHub API
#[derive(Debug, Deserialize)]
pub struct GithubUser {
    pub id: i64,
    pub login: String,
    pub avatar_url: Option<String>,
}

/// Check run as returned by GitHub API
#[derive(Debug, Deserialize)]
pub struct GithubCheckRun {
    pub name: String,
    pub status: String,
    pub conclusion: Option<String>,
}

/// Envelope of the check-runs endpoint
#[derive(Debug, Deserialize)]
pub struct GithubCheckRuns {
    pub total_count: u64,
    pub check_runs: Vec<GithubCheckRun>,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Self {
        Self::with_api_url(token, DEFAULT_API_URL)
    }

    /// Point the client at another API root (GitHub Enterprise, test servers)
    pub fn with_api_url(token: Option<String>, api_url: impl Into<String>) -> Self {
        let client = reqwest::Client::new();
        Self {
            client,
            token,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("review-radar/0.1"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(ref token) = self.token {
            if let Ok(val) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, val);
            }
        }
        headers
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, ClientError> {
        debug!("GET {}", url);
        let resp = self.client.get(url).headers(self.headers()).send().await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(url.to_string()));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || (status == reqwest::StatusCode::FORBIDDEN && is_rate_limit(resp.headers()))
        {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(ClientError::RateLimited { retry_after });
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }

    /// Follow `page=` until a short page comes back
    async fn get_paginated<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
    ) -> Result<Vec<T>, ClientError> {
        let separator = if url.contains('?') { '&' } else { '?' };
        let mut all = Vec::new();

        for page in 1..=MAX_PAGES {
            let page_url = format!("{}{}per_page={}&page={}", url, separator, PER_PAGE, page);
            let items: Vec<T> = self.get(&page_url).await?;
            let short_page = items.len() < PER_PAGE as usize;
            all.extend(items);
            if short_page {
                return Ok(all);
            }
        }

        warn!("Hit pagination limit of {} pages for {}", MAX_PAGES, url);
        Ok(all)
    }

    /// Fetch the user the token belongs to
    pub async fn get_authenticated_user(&self) -> Result<GithubUser, ClientError> {
        let url = format!("{}/user", self.api_url);
        self.get(&url).await
    }

    /// Fetch one page of PRs, most recently updated first
    pub async fn list_prs(
        &self,
        owner: &str,
        repo: &str,
        state: &str, // "all", "open", "closed"
        page: u32,
        per_page: u32,
    ) -> Result<Vec<GithubPr>, ClientError> {
        let url = format!(
            "{}/repos/{}/{}/pulls?state={}&page={}&per_page={}&sort=updated&direction=desc",
            self.api_url, owner, repo, state, page, per_page
        );
        self.get(&url).await
    }

    /// Fetch every open PR of a repository
    pub async fn list_open_prs(&self, owner: &str, repo: &str) -> Result<Vec<GithubPr>, ClientError> {
        let url = format!("{}/repos/{}/{}/pulls?state=open", self.api_url, owner, repo);
        let prs = self.get_paginated(&url).await?;
        info!("Fetched {} open PRs for {}/{}", prs.len(), owner, repo);
        Ok(prs)
    }

    /// Fetch closed PRs updated at or after `since`, handling pagination
    pub async fn fetch_closed_prs_since(
        &self,
        owner: &str,
        repo: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<GithubPr>, ClientError> {
        let mut all_prs = Vec::new();
        let mut page = 1u32;

        loop {
            debug!("Fetching closed PRs page {} for {}/{}", page, owner, repo);
            let prs = self.list_prs(owner, repo, "closed", page, PER_PAGE).await?;

            if prs.is_empty() {
                break;
            }

            let short_page = prs.len() < PER_PAGE as usize;
            let mut reached_cutoff = false;

            for pr in prs {
                if pr.updated_at >= since {
                    all_prs.push(pr);
                } else {
                    // Sorted by updated desc, everything after this is older
                    reached_cutoff = true;
                    break;
                }
            }

            if reached_cutoff || short_page {
                break;
            }

            page += 1;
            if page > MAX_PAGES {
                warn!("Hit pagination limit of {} pages", MAX_PAGES);
                break;
            }
        }

        info!(
            "Fetched {} closed PRs since {} for {}/{}",
            all_prs.len(),
            since,
            owner,
            repo
        );
        Ok(all_prs)
    }

    /// Fetch all reviews for a PR
    pub async fn list_reviews(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> Result<Vec<GithubReview>, ClientError> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}/reviews",
            self.api_url, owner, repo, pr_number
        );
        self.get_paginated(&url).await
    }

    /// Fetch check runs for a commit or branch
    pub async fn list_check_runs(
        &self,
        owner: &str,
        repo: &str,
        git_ref: &str,
    ) -> Result<Vec<GithubCheckRun>, ClientError> {
        let url = format!(
            "{}/repos/{}/{}/commits/{}/check-runs?per_page={}",
            self.api_url, owner, repo, git_ref, PER_PAGE
        );
        let runs: GithubCheckRuns = self.get(&url).await?;
        if runs.total_count > runs.check_runs.len() as u64 {
            debug!(
                "{}/{}@{} has {} check runs, only {} fetched",
                owner,
                repo,
                git_ref,
                runs.total_count,
                runs.check_runs.len()
            );
        }
        Ok(runs.check_runs)
    }
}

/// GitHub answers 403 both for missing permissions and for exhausted quota
fn is_rate_limit(headers: &HeaderMap) -> bool {
    headers.contains_key("retry-after")
        || headers
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == "0")
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GitHubClient::new(None);
        assert!(client.token.is_none());
        assert_eq!(client.api_url, DEFAULT_API_URL);

        let client = GitHubClient::new(Some("test".to_string()));
        assert_eq!(client.token, Some("test".to_string()));
    }

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        let client = GitHubClient::with_api_url(None, "https://ghe.example.com/api/v3/");
        assert_eq!(client.api_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_auth_header_only_with_token() {
        let anonymous = GitHubClient::new(None);
        assert!(anonymous.headers().get(AUTHORIZATION).is_none());

        let authed = GitHubClient::new(Some("abc".to_string()));
        assert_eq!(
            authed.headers().get(AUTHORIZATION).unwrap(),
            &HeaderValue::from_static("Bearer abc")
        );
    }

    #[test]
    fn test_forbidden_is_rate_limit_only_when_quota_exhausted() {
        let mut headers = HeaderMap::new();
        assert!(!is_rate_limit(&headers));

        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("12"));
        assert!(!is_rate_limit(&headers));

        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
        assert!(is_rate_limit(&headers));
    }

    #[test]
    fn test_deserialize_check_runs_envelope() {
        let runs: GithubCheckRuns =
            serde_json::from_str(include_str!("fixtures/check_runs.json")).unwrap();
        assert_eq!(runs.total_count, 3);
        assert_eq!(runs.check_runs[0].name, "build");
        assert_eq!(runs.check_runs[2].conclusion, None);
    }
}
