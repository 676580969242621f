//! Open PR routes

use axum::{extract::State, Json};
use chrono::Utc;
use common::models::EnrichedPr;
use processor::{queue, QueueFacets, QueueFilter, QueueSort};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiResult;
use crate::request::{parse_repositories, RepositoryInput};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PrsRequest {
    pub token: Option<String>,
    #[serde(default)]
    pub repositories: Vec<RepositoryInput>,
    #[serde(default)]
    pub filter: QueueFilter,
    #[serde(default)]
    pub sort: QueueSort,
}

#[derive(Serialize)]
pub struct PrsResponse {
    pub prs: Vec<EnrichedPr>,
    /// Filter values across the unfiltered queue
    pub facets: QueueFacets,
}

/// Enriched open PRs across the requested repositories
/// POST /api/github/prs
pub async fn list(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PrsRequest>,
) -> ApiResult<Json<PrsResponse>> {
    let repos = parse_repositories(&req.repositories)?;
    let collector = state.collector(req.token)?;

    let prs = collector.open_prs(&repos, Utc::now()).await?;
    let facets = queue::facets(&prs);

    let mut prs = req.filter.apply(prs);
    req.sort.apply(&mut prs);

    info!("Returning {} open PRs for {} repos", prs.len(), repos.len());
    Ok(Json(PrsResponse { prs, facets }))
}
