//! # Submission Verdict
//!
//! Composes the plausibility checks and the recomputation into one
//! accept/reject decision.
//!
//! ## Philosophy
//!
//! NEVER trust the client. The client says "I scored X".
//! We verify:
//! 1. Is X possible, and does the history look human?
//! 2. What does the history actually score?
//! 3. Is X close enough to that?
//!
//! The number that goes on the leaderboard is always the recomputed one.

use candlecast_shared::{Round, Submission};
use tracing::{debug, warn};

use crate::config::VerifierConfig;
use crate::error::{RejectionReason, SecurityResult, SubmissionError};
use crate::plausibility::PlausibilityValidator;
use crate::scoring::recompute;

/// Allowed absolute drift between claimed and recomputed totals.
///
/// The boundary is inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreTolerance(f64);

impl ScoreTolerance {
    /// Creates a tolerance band.
    #[must_use]
    pub const fn new(tolerance: f64) -> Self {
        Self(tolerance)
    }

    /// Width of the band.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns true if `claimed` lies within the band around `recomputed`.
    ///
    /// NaN on either side is never admitted.
    #[inline]
    #[must_use]
    pub fn admits(self, recomputed: f64, claimed: f64) -> bool {
        (recomputed - claimed).abs() <= self.0
    }
}

impl Default for ScoreTolerance {
    fn default() -> Self {
        Self(candlecast_shared::SCORE_TOLERANCE)
    }
}

/// Outcome of verifying one submission.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidationVerdict {
    /// Whether the score may be recorded.
    pub accepted: bool,
    /// Server-side total. Zero when a plausibility check rejected first,
    /// since recomputation never ran.
    pub recomputed_score: f64,
    /// Why the submission was rejected, if it was.
    pub reason: Option<RejectionReason>,
}

impl ValidationVerdict {
    /// An accepted verdict.
    #[must_use]
    pub const fn accept(recomputed_score: f64) -> Self {
        Self {
            accepted: true,
            recomputed_score,
            reason: None,
        }
    }

    /// A rejected verdict.
    #[must_use]
    pub const fn reject(reason: RejectionReason, recomputed_score: f64) -> Self {
        Self {
            accepted: false,
            recomputed_score,
            reason: Some(reason),
        }
    }

    /// The score to persist, if accepted.
    #[must_use]
    pub const fn persisted_score(&self) -> Option<f64> {
        if self.accepted {
            Some(self.recomputed_score)
        } else {
            None
        }
    }
}

/// Verifies submissions end to end.
///
/// Stateless apart from its configuration: share one instance across
/// threads freely.
#[derive(Clone, Debug, Default)]
pub struct SubmissionVerifier {
    /// Plausibility checks.
    validator: PlausibilityValidator,
    /// Tolerance band.
    tolerance: ScoreTolerance,
}

impl SubmissionVerifier {
    /// Creates a verifier from configuration.
    #[must_use]
    pub fn new(config: &VerifierConfig) -> Self {
        Self {
            validator: PlausibilityValidator::new(config.plausibility.clone()),
            tolerance: ScoreTolerance::new(config.score_tolerance),
        }
    }

    /// Returns the plausibility validator.
    #[must_use]
    pub const fn validator(&self) -> &PlausibilityValidator {
        &self.validator
    }

    /// Returns the tolerance band.
    #[must_use]
    pub const fn tolerance(&self) -> ScoreTolerance {
        self.tolerance
    }

    /// Verifies a claimed score against its round history.
    ///
    /// Returns the recomputed score on acceptance.
    ///
    /// # Errors
    ///
    /// Any plausibility failure (recomputation is skipped), or
    /// [`SubmissionError::ScoreMismatch`].
    pub fn check_rounds(&self, claimed_score: f64, rounds: &[Round]) -> SecurityResult<f64> {
        self.validator.check(claimed_score, rounds)?;

        let recomputed = recompute(rounds);
        debug!(
            claimed = claimed_score,
            recomputed,
            rounds = rounds.len(),
            "Server calculated score"
        );

        if !self.tolerance.admits(recomputed, claimed_score) {
            warn!(
                claimed = claimed_score,
                recomputed,
                tolerance = self.tolerance.value(),
                "Score mismatch detected"
            );
            return Err(SubmissionError::ScoreMismatch {
                claimed: claimed_score,
                recomputed,
                tolerance: self.tolerance.value(),
            });
        }
        Ok(recomputed)
    }

    /// Verifies a submission.
    ///
    /// # Errors
    ///
    /// As [`Self::check_rounds`].
    pub fn check(&self, submission: &Submission) -> SecurityResult<f64> {
        self.check_rounds(submission.claimed_score, &submission.rounds)
    }

    /// Verifies a submission and reports the outcome as a verdict.
    #[must_use]
    pub fn verify(&self, submission: &Submission) -> ValidationVerdict {
        match self.check(submission) {
            Ok(recomputed) => ValidationVerdict::accept(recomputed),
            Err(SubmissionError::ScoreMismatch { recomputed, .. }) => {
                ValidationVerdict::reject(RejectionReason::ScoreMismatch, recomputed)
            }
            Err(err) => ValidationVerdict::reject(err.reason(), 0.0),
        }
    }
}
