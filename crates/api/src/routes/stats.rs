//! Portfolio statistics routes

use axum::{extract::State, Json};
use chrono::{Duration, Utc};
use common::models::ReviewStats;
use common::MAX_TREND_WINDOW_DAYS;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::request::{parse_repositories, RepositoryInput};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRequest {
    pub token: Option<String>,
    #[serde(default)]
    pub repositories: Vec<RepositoryInput>,
    /// Trend lookback, defaults to TREND_WINDOW_DAYS
    pub window_days: Option<u32>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub stats: ReviewStats,
}

/// Review statistics over open PRs, with approval trends over recently closed ones
/// POST /api/github/stats
pub async fn get(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StatsRequest>,
) -> ApiResult<Json<StatsResponse>> {
    let repos = parse_repositories(&req.repositories)?;
    let window_days = req.window_days.unwrap_or(state.config.trend_window_days);
    if window_days == 0 || window_days > MAX_TREND_WINDOW_DAYS {
        return Err(ApiError::BadRequest(format!(
            "windowDays must be between 1 and {}",
            MAX_TREND_WINDOW_DAYS
        )));
    }
    let collector = state.collector(req.token)?;

    let now = Utc::now();
    let since = now
        .checked_sub_signed(Duration::days(window_days as i64))
        .ok_or_else(|| ApiError::BadRequest("windowDays out of range".to_string()))?;

    let (open_prs, closed_prs) = tokio::try_join!(
        collector.open_prs(&repos, now),
        collector.closed_prs(&repos, since, now)
    )?;

    let stats = processor::calculate_stats(&open_prs, &closed_prs, window_days, now);

    info!(
        "Stats for {} repos: {} open PRs, {} alerts, {} closed PRs in {} day window",
        repos.len(),
        stats.total_open_prs,
        stats.total_alerts,
        closed_prs.len(),
        window_days
    );

    Ok(Json(StatsResponse { stats }))
}
