//! # Server Configuration
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! file (or no file) gives a working in-memory server on port 3000.
//!
//! ```toml
//! bind_address = "0.0.0.0:3000"
//! leaderboard_path = "data/leaderboard.json"
//! leaderboard_size = 10
//!
//! [verifier]
//! score_tolerance = 300.0
//!
//! [verifier.plausibility]
//! max_rounds = 6000
//! ```

use candlecast_security::{ConfigError, VerifierConfig};
use candlecast_shared::{LEADERBOARD_SIZE, SERVER_BIND};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/server.toml";

/// Default request body limit. A maximum-length session is well under this.
pub const DEFAULT_MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Server configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_address: String,
    /// Leaderboard file. The leaderboard lives in memory when unset.
    pub leaderboard_path: Option<PathBuf>,
    /// Number of entries kept on the leaderboard.
    pub leaderboard_size: usize,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
    /// Score referee thresholds.
    pub verifier: VerifierConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SERVER_BIND.to_owned(),
            leaderboard_path: None,
            leaderboard_size: LEADERBOARD_SIZE,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            verifier: VerifierConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML, [`ConfigError::Invalid`]
    /// for out-of-range values.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Parsed listen address.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if `bind_address` is not `host:port`.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_address.parse().map_err(|e| {
            ConfigError::Invalid(format!(
                "bind_address {:?} is not a socket address: {e}",
                self.bind_address
            ))
        })
    }

    /// Checks every field.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        if self.leaderboard_size == 0 {
            return Err(ConfigError::Invalid(
                "leaderboard_size must be at least 1".to_owned(),
            ));
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_body_bytes must be at least 1".to_owned(),
            ));
        }
        self.verifier.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = ServerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_addr().unwrap().port(), 3000);
        assert_eq!(config.bind_address, candlecast_shared::SERVER_BIND);
        assert!(config.leaderboard_path.is_none());
    }

    #[test]
    fn test_nested_verifier_section() {
        let config = ServerConfig::from_toml_str(
            r#"
            bind_address = "127.0.0.1:8080"
            leaderboard_path = "data/leaderboard.json"
            leaderboard_size = 25

            [verifier]
            score_tolerance = 150.0

            [verifier.plausibility]
            max_rounds = 1000
            "#,
        )
        .unwrap();

        assert_eq!(config.leaderboard_size, 25);
        assert_eq!(
            config.leaderboard_path.as_deref(),
            Some(Path::new("data/leaderboard.json"))
        );
        assert!((config.verifier.score_tolerance - 150.0).abs() < f64::EPSILON);
        assert_eq!(config.verifier.plausibility.max_rounds, 1000);
    }

    #[test]
    fn test_bad_bind_address_rejected() {
        let err = ServerConfig::from_toml_str(r#"bind_address = "nowhere""#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_leaderboard_rejected() {
        let err = ServerConfig::from_toml_str("leaderboard_size = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_verifier_errors_propagate() {
        let err = ServerConfig::from_toml_str("[verifier]\nscore_tolerance = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ServerConfig::load("definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
