//! Application configuration

use std::env;

use crate::{Error, Result};

/// Longest approval-trend lookback a request or the server may ask for
pub const MAX_TREND_WINDOW_DAYS: u32 = 365;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Fallback token used when a request carries none
    pub github_token: Option<String>,
    pub github_api_url: String,
    /// Lookback window for approval trends, in days
    pub trend_window_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            github_token: None,
            github_api_url: "https://api.github.com".to_string(),
            trend_window_days: 30,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            github_token: env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
            github_api_url: env::var("GITHUB_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.github_api_url),
            trend_window_days: env::var("TREND_WINDOW_DAYS")
                .ok()
                .and_then(|d| d.parse().ok())
                .unwrap_or(defaults.trend_window_days),
        }
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.trend_window_days == 0 || self.trend_window_days > MAX_TREND_WINDOW_DAYS {
            return Err(Error::Config(format!(
                "TREND_WINDOW_DAYS must be between 1 and {}",
                MAX_TREND_WINDOW_DAYS
            )));
        }
        if self.github_api_url.is_empty() {
            return Err(Error::Config("GITHUB_API_URL is empty".to_string()));
        }
        Ok(())
    }
}
