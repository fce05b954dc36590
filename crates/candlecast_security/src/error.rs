//! # Security Error Types
//!
//! Every way a submission can fail to reach the leaderboard.
//!
//! All of these are recoverable: the endpoint maps each one to a 4xx
//! response with a generic message. The detailed fields exist for logs and
//! tooling only and must never be echoed to the caller.

use thiserror::Error;

/// Message returned to the caller when a plausibility check fails.
pub const INVALID_SCORE_MESSAGE: &str = "Invalid score detected";

/// Message returned to the caller when the recomputed score disagrees.
pub const SCORE_MISMATCH_MESSAGE: &str = "Score mismatch detected";

/// Message returned to the caller when the body is structurally invalid.
pub const MALFORMED_SUBMISSION_MESSAGE: &str = "Malformed submission";

/// Why a submission was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    /// Body could not be read as a submission.
    MalformedInput,
    /// More rounds than one session can hold.
    TooManyRounds,
    /// Claimed score above what the round count allows.
    ScoreExceedsCeiling,
    /// Too many near-perfect rounds.
    ExcessivePerfectRatio,
    /// Per-round scores too tightly clustered around the mean.
    ExcessiveConsistency,
    /// Claimed score outside the tolerance band of the recomputed one.
    ScoreMismatch,
}

impl RejectionReason {
    /// Generic message safe to show the caller.
    #[must_use]
    pub const fn public_message(self) -> &'static str {
        match self {
            Self::MalformedInput => MALFORMED_SUBMISSION_MESSAGE,
            Self::ScoreMismatch => SCORE_MISMATCH_MESSAGE,
            Self::TooManyRounds
            | Self::ScoreExceedsCeiling
            | Self::ExcessivePerfectRatio
            | Self::ExcessiveConsistency => INVALID_SCORE_MESSAGE,
        }
    }
}

/// Errors raised while verifying a submission.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmissionError {
    /// Missing or mistyped fields.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Session longer than a human plays.
    #[error("implausible volume: {rounds} rounds, limit {limit}")]
    ImplausibleVolume {
        /// Rounds submitted.
        rounds: usize,
        /// Configured maximum.
        limit: usize,
    },

    /// Claimed score is arithmetically impossible.
    #[error("implausible ceiling: claimed {claimed}, maximum possible {ceiling}")]
    ImplausibleCeiling {
        /// Claimed total.
        claimed: f64,
        /// `rounds * max_score_per_round`.
        ceiling: f64,
    },

    /// Too many perfect rounds.
    #[error("implausible perfect ratio: {ratio:.3} above limit {limit:.3}")]
    ImplausibleRatio {
        /// Measured fraction of perfect rounds.
        ratio: f64,
        /// Configured maximum.
        limit: f64,
    },

    /// Scores are suspiciously regular.
    #[error("implausible consistency: {ratio:.3} of rounds within one deviation, limit {limit:.3}")]
    ImplausibleConsistency {
        /// Measured fraction of rounds within one deviation of the mean.
        ratio: f64,
        /// Configured maximum.
        limit: f64,
    },

    /// Recomputed score disagrees with the claim.
    #[error("score mismatch: claimed {claimed}, recomputed {recomputed}, tolerance {tolerance}")]
    ScoreMismatch {
        /// Claimed total.
        claimed: f64,
        /// Server-side total.
        recomputed: f64,
        /// Allowed absolute drift.
        tolerance: f64,
    },
}

impl SubmissionError {
    /// The reason category of this error.
    #[must_use]
    pub const fn reason(&self) -> RejectionReason {
        match self {
            Self::MalformedInput(_) => RejectionReason::MalformedInput,
            Self::ImplausibleVolume { .. } => RejectionReason::TooManyRounds,
            Self::ImplausibleCeiling { .. } => RejectionReason::ScoreExceedsCeiling,
            Self::ImplausibleRatio { .. } => RejectionReason::ExcessivePerfectRatio,
            Self::ImplausibleConsistency { .. } => RejectionReason::ExcessiveConsistency,
            Self::ScoreMismatch { .. } => RejectionReason::ScoreMismatch,
        }
    }

    /// Generic message safe to show the caller.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        self.reason().public_message()
    }
}

/// Result type for verification operations.
pub type SecurityResult<T> = Result<T, SubmissionError>;
