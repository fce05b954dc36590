//! # Verifier Configuration
//!
//! Thresholds are loaded once at startup from TOML. Every field has a
//! default, so an empty file (or no file) yields the production values.
//!
//! ```toml
//! score_tolerance = 300.0
//!
//! [plausibility]
//! max_rounds = 6000
//! max_score_per_round = 300.0
//! perfect_score_threshold = 299.0
//! max_perfect_ratio = 0.1
//! consistency_threshold = 0.9
//! ```

use candlecast_shared::constants::SCORE_TOLERANCE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::plausibility::PlausibilityConfig;

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for this schema.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parse but make no sense.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Full verifier configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Plausibility thresholds.
    pub plausibility: PlausibilityConfig,
    /// Allowed absolute drift between claimed and recomputed totals.
    pub score_tolerance: f64,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            plausibility: PlausibilityConfig::default(),
            score_tolerance: SCORE_TOLERANCE,
        }
    }
}

impl VerifierConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Rejects values that would disable or invert a check.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.plausibility;

        if !(self.score_tolerance.is_finite() && self.score_tolerance >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "score_tolerance must be a non-negative number, got {}",
                self.score_tolerance
            )));
        }
        if !(p.max_score_per_round.is_finite() && p.max_score_per_round > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_score_per_round must be positive, got {}",
                p.max_score_per_round
            )));
        }
        for (name, value) in [
            ("max_perfect_ratio", p.max_perfect_ratio),
            ("consistency_threshold", p.consistency_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if !p.perfect_score_threshold.is_finite() {
            return Err(ConfigError::Invalid(
                "perfect_score_threshold must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = VerifierConfig::from_toml_str("").unwrap();
        assert_eq!(config, VerifierConfig::default());
        assert_eq!(config.plausibility.max_rounds, 6000);
        assert!((config.score_tolerance - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_override() {
        let config = VerifierConfig::from_toml_str(
            r"
            score_tolerance = 150.0

            [plausibility]
            max_rounds = 1000
            ",
        )
        .unwrap();

        assert!((config.score_tolerance - 150.0).abs() < f64::EPSILON);
        assert_eq!(config.plausibility.max_rounds, 1000);
        assert!((config.plausibility.consistency_threshold - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_negative_tolerance() {
        let err = VerifierConfig::from_toml_str("score_tolerance = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_ratio_out_of_range() {
        let err = VerifierConfig::from_toml_str("[plausibility]\nmax_perfect_ratio = 1.5")
            .unwrap_err();
        assert!(err.to_string().contains("max_perfect_ratio"));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = VerifierConfig::from_toml_str("score_tolerance = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = VerifierConfig::load("/nonexistent/candlecast.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
