//! Application state

use common::Config;
use github::GitHubClient;
use processor::Collector;

use crate::error::{ApiError, ApiResult};

/// Shared application state
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Client for a request, falling back to the configured token
    pub fn github_client(&self, token: Option<String>) -> ApiResult<GitHubClient> {
        let token = token
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.config.github_token.clone())
            .ok_or_else(|| ApiError::BadRequest("Missing token".to_string()))?;

        Ok(GitHubClient::with_api_url(
            Some(token),
            self.config.github_api_url.clone(),
        ))
    }

    pub fn collector(&self, token: Option<String>) -> ApiResult<Collector> {
        Ok(Collector::new(self.github_client(token)?))
    }
}
