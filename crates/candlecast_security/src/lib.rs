//! # CANDLECAST Security - The Score Referee
//!
//! Server-side verification of leaderboard submissions.
//!
//! ## Pipeline
//!
//! - **Plausibility**: cheap statistical checks on the claimed score and the
//!   client's per-round scores
//! - **Recomputation**: the authoritative score, rebuilt from predictions and
//!   outcomes
//! - **Verdict**: accept iff the claim lies within the tolerance band of the
//!   recomputed score
//!
//! ## Architecture
//!
//! ```text
//! SUBMISSION                       REFEREE
//!     │                                │
//!     │─── claimed score ─────────────►│ Plausibility ──✗──► reject
//!     │─── round history ─────────────►│      │
//!     │                                │      ▼
//!     │                                │ Recompute
//!     │                                │      │
//!     │                                │      ▼
//!     │◄─── recomputed score ─────────┤ Tolerance ──✗──► reject
//!     │                                │
//! ```
//!
//! Every stage is pure. Nothing here performs I/O or keeps state between
//! submissions.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod plausibility;
pub mod scoring;
pub mod verdict;

pub use config::{ConfigError, VerifierConfig};
pub use error::{
    RejectionReason, SecurityResult, SubmissionError, INVALID_SCORE_MESSAGE,
    MALFORMED_SUBMISSION_MESSAGE, SCORE_MISMATCH_MESSAGE,
};
pub use plausibility::{PlausibilityConfig, PlausibilityValidator};
pub use scoring::{recompute, round_points, RoundBreakdown};
pub use verdict::{ScoreTolerance, SubmissionVerifier, ValidationVerdict};
