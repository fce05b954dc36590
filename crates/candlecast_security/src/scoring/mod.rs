//! # Score Recomputation
//!
//! The authoritative scoring formula.
//!
//! ## Formula
//!
//! For a round where the direction call was right:
//!
//! ```text
//! error  = | predicted_magnitude - |actual_magnitude| |
//! bonus  = 200 * exp(-3 * error)
//! points = min(300, 100 + bonus)
//! ```
//!
//! A wrong call earns 0. The client shows a -50 penalty for wrong calls but
//! that number is never trusted: a forged negative entry must not be able
//! to "pay for" an inflated total elsewhere.
//!
//! A round with a non-finite magnitude earns 0. Recomputation never fails.

use candlecast_shared::constants::{
    BASE_POINTS, BONUS_DECAY_RATE, MAX_BONUS_POINTS, MAX_SCORE_PER_ROUND, WRONG_DIRECTION_PENALTY,
};
use candlecast_shared::Round;

/// Distance between the predicted and realized magnitude.
///
/// Direction is scored separately, so only the size of the realized move
/// counts. Non-finite input yields `+inf`.
#[inline]
#[must_use]
pub fn accuracy_error(predicted_magnitude: f64, actual_magnitude: f64) -> f64 {
    let error = (predicted_magnitude - actual_magnitude.abs()).abs();
    if error.is_finite() {
        error
    } else {
        f64::INFINITY
    }
}

/// Bonus points for a given accuracy error.
#[inline]
#[must_use]
pub fn accuracy_bonus(error: f64) -> f64 {
    if error.is_finite() {
        MAX_BONUS_POINTS * (-BONUS_DECAY_RATE * error).exp()
    } else {
        0.0
    }
}

/// Trusted points for one round.
#[must_use]
pub fn round_points(round: &Round) -> f64 {
    if !round.direction_matches() {
        return 0.0;
    }
    let error = accuracy_error(round.predicted_magnitude, round.actual_magnitude);
    if !error.is_finite() {
        return 0.0;
    }
    (BASE_POINTS + accuracy_bonus(error)).min(MAX_SCORE_PER_ROUND)
}

/// Recomputes the total score of a round history.
///
/// Empty history scores 0. The result is never negative and never exceeds
/// `300 * rounds.len()`.
#[must_use]
pub fn recompute(rounds: &[Round]) -> f64 {
    rounds.iter().map(round_points).fold(0.0, |total, points| total + points)
}

/// Points the browser client displays for a round.
///
/// Uncapped, with the -50 wrong-call penalty. Use this to build the
/// `round_score` a genuine client would send; never to score a submission.
#[must_use]
pub fn client_round_points(round: &Round) -> f64 {
    if round.direction_matches() {
        BASE_POINTS
            + accuracy_bonus(accuracy_error(
                round.predicted_magnitude,
                round.actual_magnitude,
            ))
    } else {
        WRONG_DIRECTION_PENALTY
    }
}

/// Per-round scoring diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundBreakdown {
    /// Position in the history.
    pub index: usize,
    /// Whether the direction call was right.
    pub direction_correct: bool,
    /// Magnitude error (`+inf` when a magnitude is not finite).
    pub accuracy_error: f64,
    /// Points the server grants.
    pub trusted_points: f64,
    /// Points the client claimed.
    pub claimed_points: f64,
}

impl RoundBreakdown {
    /// Claimed minus trusted points.
    #[inline]
    #[must_use]
    pub fn drift(&self) -> f64 {
        self.claimed_points - self.trusted_points
    }
}

/// Scores every round individually.
#[must_use]
pub fn breakdown(rounds: &[Round]) -> Vec<RoundBreakdown> {
    rounds
        .iter()
        .enumerate()
        .map(|(index, round)| RoundBreakdown {
            index,
            direction_correct: round.direction_matches(),
            accuracy_error: accuracy_error(round.predicted_magnitude, round.actual_magnitude),
            trusted_points: round_points(round),
            claimed_points: round.round_score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use candlecast_shared::Direction::{Down, Up};

    const EPS: f64 = 1e-9;

    #[test]
    fn test_empty_history_scores_zero() {
        assert!(recompute(&[]).abs() < EPS);
    }

    #[test]
    fn test_perfect_prediction_hits_cap() {
        let rounds = [Round::new(Up, 1.0, Up, 1.0, 300.0)];
        assert!((recompute(&rounds) - 300.0).abs() < EPS);
    }

    #[test]
    fn test_wrong_direction_scores_zero() {
        let rounds = [Round::new(Up, 5.0, Down, -2.0, -50.0)];
        assert!(recompute(&rounds).abs() < EPS);

        // Even a "perfect" magnitude earns nothing with the wrong call
        let round = Round::new(Down, 2.0, Up, 2.0, 300.0);
        assert!(round_points(&round).abs() < EPS);
    }

    #[test]
    fn test_direction_uses_absolute_actual_change() {
        let round = Round::new(Down, 1.5, Down, -1.5, 300.0);
        assert!((round_points(&round) - 300.0).abs() < EPS);
    }

    #[test]
    fn test_bonus_decays_with_error() {
        // error = 0.5 -> 100 + 200 * e^-1.5
        let round = Round::new(Up, 1.5, Up, 1.0, 0.0);
        let expected = 100.0 + 200.0 * (-1.5f64).exp();
        assert!((round_points(&round) - expected).abs() < EPS);

        let far = Round::new(Up, 50.0, Up, 0.1, 0.0);
        let points = round_points(&far);
        assert!((100.0..100.001).contains(&points));
    }

    #[test]
    fn test_non_finite_magnitudes_score_zero() {
        for round in [
            Round::new(Up, f64::NAN, Up, 1.0, 0.0),
            Round::new(Up, 1.0, Up, f64::INFINITY, 0.0),
            Round::new(Up, f64::NEG_INFINITY, Up, 1.0, 0.0),
            Round::new(Down, f64::NAN, Up, f64::NAN, 0.0),
        ] {
            assert!(round_points(&round).abs() < EPS, "{round:?}");
        }
        assert!(accuracy_error(f64::NAN, 1.0).is_infinite());
        assert!(accuracy_bonus(f64::INFINITY).abs() < EPS);
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let rounds: Vec<Round> = (0..50)
            .map(|i| {
                let actual = f64::from(i % 7) * 0.37 - 1.0;
                let direction = candlecast_shared::Direction::from_change(actual);
                Round::new(direction, f64::from(i % 5) * 0.2, Up, actual, 0.0)
            })
            .collect();

        let first = recompute(&rounds);
        for _ in 0..10 {
            assert_eq!(recompute(&rounds).to_bits(), first.to_bits());
        }
    }

    #[test]
    fn test_recompute_never_exceeds_ceiling() {
        let rounds: Vec<Round> = (0..200)
            .map(|i| {
                let magnitude = f64::from(i) * 0.01;
                Round::new(Up, magnitude, Up, magnitude, 0.0)
            })
            .collect();
        let total = recompute(&rounds);
        assert!(total <= 300.0 * 200.0 + EPS);
        assert!(total >= 0.0);
    }

    #[test]
    fn test_client_formula_includes_penalty() {
        let wrong = Round::new(Up, 1.0, Down, -1.0, 0.0);
        assert!((client_round_points(&wrong) + 50.0).abs() < EPS);

        let right = Round::new(Up, 1.0, Up, 1.0, 0.0);
        assert!((client_round_points(&right) - 300.0).abs() < EPS);
    }

    #[test]
    fn test_breakdown_reports_drift() {
        let rounds = [
            Round::new(Up, 1.0, Up, 1.0, 300.0),
            Round::new(Up, 1.0, Down, -1.0, -50.0),
        ];
        let rows = breakdown(&rounds);

        assert_eq!(rows.len(), 2);
        assert!(rows[0].direction_correct);
        assert!(rows[0].drift().abs() < EPS);
        assert!(!rows[1].direction_correct);
        assert!((rows[1].drift() + 50.0).abs() < EPS);
    }
}
