//! Fetch PRs, reviews and check runs from GitHub and enrich them

use std::future::Future;

use chrono::{DateTime, Utc};
use common::models::{CheckRun, EnrichedPr, PullRequest, Repository, Review};
use futures::future::try_join_all;
use futures::stream::{self, StreamExt, TryStreamExt};
use github::{ClientError, GitHubClient, GithubPr};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::enrich::enrich_pr;

/// PRs of one repository whose reviews and checks are fetched at the same time
const PR_CONCURRENCY: usize = 8;

#[derive(Error, Debug)]
pub enum CollectError {
    #[error("Repository {0} not found")]
    RepoNotFound(String),
    #[error("GitHub API error for {repo}: {source}")]
    GitHub {
        repo: String,
        #[source]
        source: ClientError,
    },
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

impl CollectError {
    fn from_client(repo: &Repository, err: ClientError) -> Self {
        match err {
            ClientError::RateLimited { retry_after } => CollectError::RateLimited(retry_after),
            ClientError::NotFound(_) => CollectError::RepoNotFound(repo.full_name()),
            source => CollectError::GitHub {
                repo: repo.full_name(),
                source,
            },
        }
    }
}

/// Fetches everything one analytics pass needs.
///
/// Repositories are fetched concurrently. Within a repository at most
/// `PR_CONCURRENCY` PRs have their reviews and check runs in flight, to stay
/// clear of GitHub's secondary rate limits. Nothing is cached between calls.
pub struct Collector {
    client: GitHubClient,
}

impl Collector {
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }

    /// Open PRs of every repository, enriched against `now`.
    ///
    /// Failing to list a repository's PRs fails the whole pass; a PR whose
    /// reviews or checks can't be fetched is enriched with an empty list.
    pub async fn open_prs(
        &self,
        repos: &[Repository],
        now: DateTime<Utc>,
    ) -> Result<Vec<EnrichedPr>, CollectError> {
        let per_repo =
            try_join_all(repos.iter().map(|repo| self.open_prs_for_repo(repo, now))).await?;
        let prs: Vec<EnrichedPr> = per_repo.into_iter().flatten().collect();
        info!("Collected {} open PRs across {} repos", prs.len(), repos.len());
        Ok(prs)
    }

    /// Closed PRs updated since `since`, without check runs.
    ///
    /// A repository whose closed PRs can't be listed contributes nothing.
    pub async fn closed_prs(
        &self,
        repos: &[Repository],
        since: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Vec<EnrichedPr>, CollectError> {
        let per_repo = try_join_all(
            repos
                .iter()
                .map(|repo| self.closed_prs_for_repo(repo, since, now)),
        )
        .await?;
        let prs: Vec<EnrichedPr> = per_repo.into_iter().flatten().collect();
        info!(
            "Collected {} closed PRs across {} repos since {}",
            prs.len(),
            repos.len(),
            since
        );
        Ok(prs)
    }

    /// Reviews of a single PR; an unreachable PR yields no reviews
    pub async fn reviews(&self, repo: &Repository, number: u64) -> Result<Vec<Review>, CollectError> {
        self.fetch_reviews(repo, number).await
    }

    async fn open_prs_for_repo(
        &self,
        repo: &Repository,
        now: DateTime<Utc>,
    ) -> Result<Vec<EnrichedPr>, CollectError> {
        let prs = self
            .client
            .list_open_prs(&repo.owner, &repo.name)
            .await
            .map_err(|e| CollectError::from_client(repo, e))?;

        for_each_pr(prs, |pr| self.enrich_open(repo, pr, now)).await
    }

    async fn closed_prs_for_repo(
        &self,
        repo: &Repository,
        since: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Vec<EnrichedPr>, CollectError> {
        let listing = self
            .client
            .fetch_closed_prs_since(&repo.owner, &repo.name, since)
            .await;
        let prs = or_empty(listing, &format!("closed PRs for {}", repo))?;

        for_each_pr(prs, |pr| self.enrich_closed(repo, pr, now)).await
    }

    async fn enrich_open(
        &self,
        repo: &Repository,
        pr: GithubPr,
        now: DateTime<Utc>,
    ) -> Result<EnrichedPr, CollectError> {
        let pr = PullRequest::from(pr);
        let (reviews, checks) = futures::try_join!(
            self.fetch_reviews(repo, pr.number),
            self.fetch_checks(repo, &pr.head.sha)
        )?;
        Ok(enrich_pr(repo, pr, reviews, checks, now))
    }

    async fn enrich_closed(
        &self,
        repo: &Repository,
        pr: GithubPr,
        now: DateTime<Utc>,
    ) -> Result<EnrichedPr, CollectError> {
        let pr = PullRequest::from(pr);
        let reviews = self.fetch_reviews(repo, pr.number).await?;
        Ok(enrich_pr(repo, pr, reviews, Vec::new(), now))
    }

    async fn fetch_reviews(&self, repo: &Repository, number: u64) -> Result<Vec<Review>, CollectError> {
        let result = self
            .client
            .list_reviews(&repo.owner, &repo.name, number)
            .await;
        let reviews = or_empty(result, &format!("reviews for {}#{}", repo, number))?;
        debug!("{}#{} has {} reviews", repo, number, reviews.len());
        Ok(github::into_reviews(reviews))
    }

    async fn fetch_checks(&self, repo: &Repository, sha: &str) -> Result<Vec<CheckRun>, CollectError> {
        let result = self
            .client
            .list_check_runs(&repo.owner, &repo.name, sha)
            .await;
        let runs = or_empty(result, &format!("checks for {}@{}", repo, sha))?;
        Ok(runs.into_iter().map(CheckRun::from).collect())
    }
}

/// Run `f` over every PR with bounded concurrency, keeping listing order
async fn for_each_pr<T, U, F, Fut>(prs: Vec<T>, f: F) -> Result<Vec<U>, CollectError>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<U, CollectError>>,
{
    stream::iter(prs)
        .map(f)
        .buffered(PR_CONCURRENCY)
        .try_collect()
        .await
}

/// Degrade a failed listing to an empty one. Rate limiting still aborts the pass.
fn or_empty<T>(result: Result<Vec<T>, ClientError>, what: &str) -> Result<Vec<T>, CollectError> {
    match result {
        Ok(items) => Ok(items),
        Err(ClientError::RateLimited { retry_after }) => Err(CollectError::RateLimited(retry_after)),
        Err(e) => {
            warn!("Error fetching {}: {}", what, e);
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::task::Poll;

    /// Returns Pending once so other buffered futures get polled meanwhile
    async fn yield_once() {
        let mut yielded = false;
        futures::future::poll_fn(move |cx| {
            if yielded {
                Poll::Ready(())
            } else {
                yielded = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        })
        .await
    }

    #[test]
    fn test_for_each_pr_bounds_in_flight_and_keeps_order() {
        let in_flight = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        let numbers: Vec<u64> = (1..=30).collect();
        let result = futures::executor::block_on(for_each_pr(numbers, |n| {
            let in_flight = &in_flight;
            let peak = &peak;
            async move {
                let current = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(current, Ordering::SeqCst);
                yield_once().await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok(n * 10)
            }
        }))
        .unwrap();

        assert_eq!(result, (1..=30).map(|n| n * 10).collect::<Vec<u64>>());
        assert_eq!(peak.load(Ordering::SeqCst), PR_CONCURRENCY);
    }

    #[test]
    fn test_for_each_pr_stops_on_rate_limit() {
        let result = futures::executor::block_on(for_each_pr(vec![1u64, 2, 3], |n| async move {
            if n == 2 {
                Err(CollectError::RateLimited(30))
            } else {
                Ok(n)
            }
        }));
        assert!(matches!(result, Err(CollectError::RateLimited(30))));
    }

    #[test]
    fn test_or_empty_swallows_api_errors() {
        let result: Result<Vec<u8>, ClientError> = Err(ClientError::Api {
            status: 500,
            message: "boom".to_string(),
        });
        assert!(or_empty(result, "things").unwrap().is_empty());
    }

    #[test]
    fn test_or_empty_propagates_rate_limit() {
        let result: Result<Vec<u8>, ClientError> = Err(ClientError::RateLimited { retry_after: 42 });
        assert!(matches!(
            or_empty(result, "things"),
            Err(CollectError::RateLimited(42))
        ));
    }

    #[test]
    fn test_from_client_maps_not_found_to_repo() {
        let repo = Repository::new("acme", "gone");
        let err = CollectError::from_client(&repo, ClientError::NotFound("url".to_string()));
        assert!(matches!(err, CollectError::RepoNotFound(ref name) if name == "acme/gone"));
    }
}
