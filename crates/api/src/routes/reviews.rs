//! Review listing routes

use axum::{extract::State, Json};
use common::models::{Repository, Review};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsRequest {
    pub token: Option<String>,
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub pr_number: Option<u64>,
}

#[derive(Serialize)]
pub struct ReviewsResponse {
    pub reviews: Vec<Review>,
}

/// Reviews of one PR
/// POST /api/github/reviews
pub async fn list(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReviewsRequest>,
) -> ApiResult<Json<ReviewsResponse>> {
    let (owner, repo, pr_number) = match (req.owner, req.repo, req.pr_number) {
        (Some(owner), Some(repo), Some(number)) if !owner.is_empty() && !repo.is_empty() => {
            (owner, repo, number)
        }
        _ => return Err(ApiError::BadRequest("Missing required parameters".to_string())),
    };
    let collector = state.collector(req.token)?;

    let reviews = collector
        .reviews(&Repository::new(owner, repo), pr_number)
        .await?;

    Ok(Json(ReviewsResponse { reviews }))
}
