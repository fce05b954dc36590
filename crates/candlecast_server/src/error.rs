//! # Server Error Types

use candlecast_leaderboard::StoreError;
use candlecast_security::ConfigError;
use thiserror::Error;

/// Errors that stop the server from starting or serving.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration could not be loaded or is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Socket or filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Leaderboard store failure.
    #[error("leaderboard store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
