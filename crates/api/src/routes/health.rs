//! Health check route

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// Whether requests without a token fall back to GITHUB_TOKEN
    fallback_token: bool,
    trend_window_days: u32,
}

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        fallback_token: state.config.github_token.is_some(),
        trend_window_days: state.config.trend_window_days,
    })
}
