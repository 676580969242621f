//! Error types

use thiserror::Error;

/// Main error type for Review Radar
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid repository identifier '{0}', expected owner/name")]
    InvalidRepository(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
