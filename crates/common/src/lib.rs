//! Common types and utilities for Review Radar

pub mod config;
pub mod error;
pub mod models;

pub use config::{Config, MAX_TREND_WINDOW_DAYS};
pub use error::{Error, Result};
