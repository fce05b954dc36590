//! # CANDLECAST Shared
//!
//! Common types used by the verifier, the leaderboard and the endpoint.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - `tokio`
//! - `axum`
//! - Anything that performs I/O
//!
//! The scoring core is pure; its inputs must be too.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;
pub mod protocol;

pub use constants::{
    LEADERBOARD_SIZE, MAX_ROUNDS, MAX_SCORE_PER_ROUND, PERFECT_SCORE_THRESHOLD, SCORE_TOLERANCE,
    SERVER_BIND,
};
pub use protocol::{Direction, LeaderboardEntry, ParseDirectionError, Round, Submission};
