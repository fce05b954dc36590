//! # Leaderboard Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing the leaderboard.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem failure.
    #[error("leaderboard I/O failed at {path}: {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Stored data is not a valid leaderboard.
    #[error("leaderboard data is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for leaderboard operations.
pub type StoreResult<T> = Result<T, StoreError>;
