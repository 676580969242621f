//! Request body pieces shared by the GitHub routes

use common::models::Repository;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};

/// A repository as sent by clients: `"owner/name"` or `{owner, name}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RepositoryInput {
    FullName(String),
    Parts { owner: String, name: String },
}

impl RepositoryInput {
    fn parse(&self) -> ApiResult<Repository> {
        match self {
            RepositoryInput::FullName(full_name) => Ok(full_name.parse::<Repository>()?),
            RepositoryInput::Parts { owner, name } => {
                if owner.is_empty() || name.is_empty() {
                    return Err(ApiError::from(common::Error::InvalidRepository(format!(
                        "{}/{}",
                        owner, name
                    ))));
                }
                Ok(Repository::new(owner.as_str(), name.as_str()))
            }
        }
    }
}

/// Parse and deduplicate, rejecting an empty list
pub fn parse_repositories(inputs: &[RepositoryInput]) -> ApiResult<Vec<Repository>> {
    if inputs.is_empty() {
        return Err(ApiError::BadRequest(
            "Missing token or repositories".to_string(),
        ));
    }

    let mut repos: Vec<Repository> = Vec::with_capacity(inputs.len());
    for input in inputs {
        let repo = input.parse()?;
        if !repos.contains(&repo) {
            repos.push(repo);
        }
    }
    Ok(repos)
}
