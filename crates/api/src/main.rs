//! Review Radar API Server

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

mod error;
mod request;
mod routes;
mod state;

use state::AppState;

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/github/prs", post(routes::prs::list))
        .route("/api/github/stats", post(routes::stats::get))
        .route("/api/github/reviews", post(routes::reviews::list))
        .route("/api/github/verify", post(routes::verify::verify))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api=debug".parse()?)
                .add_directive("processor=info".parse()?)
                .add_directive("github=info".parse()?),
        )
        .init();

    info!("Starting Review Radar API");

    // Load configuration
    let config = common::Config::from_env();
    config.validate()?;

    if config.github_token.is_none() {
        info!("No GITHUB_TOKEN set, requests must carry their own token");
    }
    info!(
        "Approval trends cover {} days, GitHub API at {}",
        config.trend_window_days, config.github_api_url
    );

    let addr = format!("{}:{}", config.host, config.port);
    let app = router(Arc::new(AppState::new(config)));

    // Start server
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
