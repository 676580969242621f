//! Token verification routes

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub token: Option<String>,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
}

/// Check that a token can reach the GitHub API
/// POST /api/github/verify
pub async fn verify(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyRequest>,
) -> ApiResult<Json<VerifyResponse>> {
    let client = state.github_client(req.token)?;

    let response = match client.get_authenticated_user().await {
        Ok(user) => {
            info!("Token verified for {}", user.login);
            VerifyResponse {
                valid: true,
                login: Some(user.login),
            }
        }
        Err(e) => {
            debug!("Token verification failed: {}", e);
            VerifyResponse {
                valid: false,
                login: None,
            }
        }
    };

    Ok(Json(response))
}
