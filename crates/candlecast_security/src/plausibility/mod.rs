//! # Plausibility Checks
//!
//! Statistical filter run before the recomputed score is trusted.
//!
//! ## Detection Methods
//!
//! - **Volume**: sessions longer than a human plays (scripted, unattended)
//! - **Ceiling**: totals no round count can produce
//! - **Perfect ratio**: too many near-perfect magnitude calls
//! - **Consistency**: per-round scores clustered too tightly (bot play)
//!
//! Checks run cheapest first and stop at the first failure. This is a
//! heuristic, not a proof: passing it only means nothing looked impossible.

use candlecast_shared::constants::{
    CONSISTENCY_THRESHOLD, MAX_PERFECT_RATIO, MAX_ROUNDS, MAX_SCORE_PER_ROUND,
    PERFECT_SCORE_THRESHOLD,
};
use candlecast_shared::math::{finite_or, ratio, std_dev_about};
use candlecast_shared::Round;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{SecurityResult, SubmissionError};

/// Thresholds for the plausibility checks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlausibilityConfig {
    /// Maximum rounds per session.
    pub max_rounds: usize,
    /// Maximum points one round can earn.
    pub max_score_per_round: f64,
    /// Round scores strictly above this count as perfect.
    pub perfect_score_threshold: f64,
    /// Maximum fraction of perfect rounds.
    pub max_perfect_ratio: f64,
    /// Maximum fraction of rounds within one deviation of the mean.
    pub consistency_threshold: f64,
}

impl Default for PlausibilityConfig {
    fn default() -> Self {
        Self {
            max_rounds: MAX_ROUNDS, // ~5 hours of play
            max_score_per_round: MAX_SCORE_PER_ROUND,
            perfect_score_threshold: PERFECT_SCORE_THRESHOLD,
            max_perfect_ratio: MAX_PERFECT_RATIO,
            consistency_threshold: CONSISTENCY_THRESHOLD,
        }
    }
}

/// Plausibility validator.
///
/// Holds only its thresholds. Two calls with the same input always agree.
#[derive(Clone, Debug, Default)]
pub struct PlausibilityValidator {
    /// Configuration.
    config: PlausibilityConfig,
}

impl PlausibilityValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new(config: PlausibilityConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PlausibilityConfig {
        &self.config
    }

    /// Returns true if the submission passes every check.
    #[must_use]
    pub fn validate(&self, claimed_score: f64, rounds: &[Round]) -> bool {
        self.check(claimed_score, rounds).is_ok()
    }

    /// Runs every check, failing on the first one that trips.
    ///
    /// # Errors
    ///
    /// The error variant names the check that failed and what was measured.
    pub fn check(&self, claimed_score: f64, rounds: &[Round]) -> SecurityResult<()> {
        self.check_volume(rounds.len())?;
        self.check_ceiling(claimed_score, rounds.len())?;

        // Ratios over zero rounds are meaningless
        if rounds.is_empty() {
            return Ok(());
        }

        self.check_perfect_ratio(rounds)?;
        self.check_consistency(claimed_score, rounds)
    }

    /// Checks the session length.
    fn check_volume(&self, round_count: usize) -> SecurityResult<()> {
        if round_count > self.config.max_rounds {
            warn!(
                rounds = round_count,
                limit = self.config.max_rounds,
                "Too many rounds played. Possible cheating detected."
            );
            return Err(SubmissionError::ImplausibleVolume {
                rounds: round_count,
                limit: self.config.max_rounds,
            });
        }
        Ok(())
    }

    /// Checks the claim against the best total the round count allows.
    #[allow(clippy::cast_precision_loss)]
    fn check_ceiling(&self, claimed_score: f64, round_count: usize) -> SecurityResult<()> {
        let ceiling = round_count as f64 * self.config.max_score_per_round;

        if !claimed_score.is_finite() || claimed_score > ceiling {
            warn!(
                claimed = claimed_score,
                ceiling, "Score is higher than possible. Cheating detected."
            );
            return Err(SubmissionError::ImplausibleCeiling {
                claimed: claimed_score,
                ceiling,
            });
        }
        Ok(())
    }

    /// Checks how many rounds the client marked as (near) perfect.
    fn check_perfect_ratio(&self, rounds: &[Round]) -> SecurityResult<()> {
        let perfect = claimed_scores(rounds)
            .filter(|score| *score > self.config.perfect_score_threshold)
            .count();
        let perfect_ratio = ratio(perfect, rounds.len());

        if perfect_ratio > self.config.max_perfect_ratio {
            warn!(
                perfect,
                ratio = perfect_ratio,
                limit = self.config.max_perfect_ratio,
                "Too many perfect scores. Possible cheating detected."
            );
            return Err(SubmissionError::ImplausibleRatio {
                ratio: perfect_ratio,
                limit: self.config.max_perfect_ratio,
            });
        }
        Ok(())
    }

    /// Checks that the per-round scores show human spread.
    ///
    /// The mean is taken from the claimed total, not from the round scores,
    /// so a claim that disagrees with its own rounds widens the deviation.
    /// A round exactly one deviation away counts as consistent.
    #[allow(clippy::cast_precision_loss)]
    fn check_consistency(&self, claimed_score: f64, rounds: &[Round]) -> SecurityResult<()> {
        let mean = claimed_score / rounds.len() as f64;
        let deviation = std_dev_about(claimed_scores(rounds), mean);

        let consistent = claimed_scores(rounds)
            .filter(|score| (score - mean).abs() <= deviation)
            .count();
        let consistency = ratio(consistent, rounds.len());

        if consistency > self.config.consistency_threshold {
            warn!(
                mean,
                deviation,
                ratio = consistency,
                limit = self.config.consistency_threshold,
                "Scores are unrealistically consistent. Possible cheating detected."
            );
            return Err(SubmissionError::ImplausibleConsistency {
                ratio: consistency,
                limit: self.config.consistency_threshold,
            });
        }
        Ok(())
    }
}

/// Client-claimed round scores, with non-finite values read as 0.
fn claimed_scores(rounds: &[Round]) -> impl Iterator<Item = f64> + '_ {
    rounds.iter().map(|round| finite_or(round.round_score, 0.0))
}
