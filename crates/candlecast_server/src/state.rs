//! Shared handler state.

use candlecast_leaderboard::{FileStore, Leaderboard, LeaderboardStore, MemoryStore};
use candlecast_security::SubmissionVerifier;
use std::sync::Arc;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::ServerResult;

/// Leaderboard over whichever store the config selected.
pub type SharedLeaderboard = Leaderboard<Box<dyn LeaderboardStore>>;

/// State cloned into every request handler.
#[derive(Clone)]
pub struct AppState {
    /// Score referee.
    pub verifier: Arc<SubmissionVerifier>,
    /// Top-N list.
    pub leaderboard: Arc<SharedLeaderboard>,
    /// Request body limit.
    pub max_body_bytes: usize,
}

impl AppState {
    /// Builds state from an explicit verifier and store.
    #[must_use]
    pub fn new(
        verifier: SubmissionVerifier,
        store: Box<dyn LeaderboardStore>,
        leaderboard_size: usize,
    ) -> Self {
        Self {
            verifier: Arc::new(verifier),
            leaderboard: Arc::new(Leaderboard::new(store, leaderboard_size)),
            max_body_bytes: crate::config::DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Builds state from configuration.
    ///
    /// The store is read once so a corrupt or unreadable leaderboard file
    /// stops startup instead of failing every request.
    ///
    /// # Errors
    ///
    /// [`crate::ServerError::Store`] if the configured store cannot be read.
    pub fn from_config(config: &ServerConfig) -> ServerResult<Self> {
        let store: Box<dyn LeaderboardStore> = match &config.leaderboard_path {
            Some(path) => {
                info!(path = %path.display(), "Using file leaderboard");
                Box::new(FileStore::new(path))
            }
            None => {
                info!("Using in-memory leaderboard");
                Box::new(MemoryStore::new())
            }
        };

        let mut state = Self::new(
            SubmissionVerifier::new(&config.verifier),
            store,
            config.leaderboard_size,
        );
        state.max_body_bytes = config.max_body_bytes;

        let existing = state.leaderboard.entries()?;
        info!(entries = existing.len(), "Leaderboard loaded");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServerError;

    #[test]
    fn test_default_config_is_in_memory() {
        let state = AppState::from_config(&ServerConfig::default()).unwrap();
        assert!(state.leaderboard.entries().unwrap().is_empty());
        assert_eq!(state.leaderboard.capacity(), 10);
    }

    #[test]
    fn test_corrupt_leaderboard_file_stops_startup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.json");
        std::fs::write(&path, "[{\"name\": ").unwrap();

        let config = ServerConfig {
            leaderboard_path: Some(path),
            ..ServerConfig::default()
        };
        let err = AppState::from_config(&config).err().unwrap();
        assert!(matches!(err, ServerError::Store(_)));
    }

    #[test]
    fn test_missing_leaderboard_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            leaderboard_path: Some(dir.path().join("data").join("leaderboard.json")),
            ..ServerConfig::default()
        };
        assert!(AppState::from_config(&config).is_ok());
    }
}
