//! # Scoring & Anti-Cheat Constants
//!
//! Production values for the CANDLECAST scoring formula and the plausibility
//! checks.
//!
//! **CRITICAL:** The scoring constants must match the browser client
//! formula. Changing them without shipping a new client makes every honest
//! submission fail the tolerance check.

// =============================================================================
// SCORING FORMULA
// =============================================================================

/// Points awarded for calling the direction correctly.
pub const BASE_POINTS: f64 = 100.0;

/// Maximum accuracy bonus (reached when the magnitude is exact).
pub const MAX_BONUS_POINTS: f64 = 200.0;

/// Exponential decay rate of the accuracy bonus per percentage point of error.
pub const BONUS_DECAY_RATE: f64 = 3.0;

/// Hard cap on the points a single round can contribute.
pub const MAX_SCORE_PER_ROUND: f64 = 300.0;

/// Penalty the client shows for a wrong call.
///
/// Display only. The server never applies it.
pub const WRONG_DIRECTION_PENALTY: f64 = -50.0;

// =============================================================================
// PLAUSIBILITY DEFAULTS
// =============================================================================

/// Maximum rounds in one session (about 5 hours of play).
pub const MAX_ROUNDS: usize = 6000;

/// Round scores strictly above this count as "perfect".
pub const PERFECT_SCORE_THRESHOLD: f64 = 299.0;

/// Maximum fraction of perfect rounds.
pub const MAX_PERFECT_RATIO: f64 = 0.1;

/// Maximum fraction of rounds lying within one standard deviation of the mean.
pub const CONSISTENCY_THRESHOLD: f64 = 0.9;

/// Allowed absolute drift between claimed and recomputed totals (one round).
pub const SCORE_TOLERANCE: f64 = 300.0;

// =============================================================================
// LEADERBOARD & SERVER
// =============================================================================

/// Number of entries kept on the leaderboard.
pub const LEADERBOARD_SIZE: usize = 10;

/// Default HTTP bind address.
pub const SERVER_BIND: &str = "0.0.0.0:3000";
