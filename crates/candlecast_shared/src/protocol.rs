//! Wire types shared between the browser client and the server.
//!
//! The JSON shape is fixed by the client: a round nests the prediction and
//! the revealed outcome. On the Rust side a [`Round`] is flat.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of the next candle.
///
/// The client calls these "Green" and "Red". "Up" and "Down" are accepted
/// too, case-insensitively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Direction {
    /// Close above the previous close.
    Up,
    /// Close at or below the previous close.
    Down,
}

impl Direction {
    /// Direction implied by a signed percentage change.
    ///
    /// A flat candle counts as `Down`, matching the client.
    #[inline]
    #[must_use]
    pub fn from_change(change_pct: f64) -> Self {
        if change_pct > 0.0 {
            Self::Up
        } else {
            Self::Down
        }
    }

    /// Name the client uses on the wire.
    #[inline]
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Up => "Green",
            Self::Down => "Red",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Error for a direction word that is neither green/up nor red/down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDirectionError(pub String);

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown direction {:?}", self.0)
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "green" | "up" => Ok(Self::Up),
            "red" | "down" => Ok(Self::Down),
            _ => Err(ParseDirectionError(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = ParseDirectionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Direction> for &'static str {
    fn from(direction: Direction) -> Self {
        direction.wire_name()
    }
}

/// One predict-then-reveal cycle.
///
/// Immutable once submitted: the server only reads it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireRound", into = "WireRound")]
pub struct Round {
    /// Direction the player called.
    pub predicted_direction: Direction,
    /// Magnitude the player called, in percentage points.
    pub predicted_magnitude: f64,
    /// Direction the candle actually closed.
    pub actual_direction: Direction,
    /// Realized signed percentage change.
    pub actual_magnitude: f64,
    /// Points the client claims for this round (untrusted).
    pub round_score: f64,
}

impl Round {
    /// Creates a round.
    #[must_use]
    pub const fn new(
        predicted_direction: Direction,
        predicted_magnitude: f64,
        actual_direction: Direction,
        actual_magnitude: f64,
        round_score: f64,
    ) -> Self {
        Self {
            predicted_direction,
            predicted_magnitude,
            actual_direction,
            actual_magnitude,
            round_score,
        }
    }

    /// Returns true if the player called the direction correctly.
    #[inline]
    #[must_use]
    pub fn direction_matches(&self) -> bool {
        self.predicted_direction == self.actual_direction
    }

    /// Returns a copy with a different claimed round score.
    #[must_use]
    pub fn with_round_score(mut self, round_score: f64) -> Self {
        self.round_score = round_score;
        self
    }
}

/// A call or an outcome, as nested on the wire.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct WireCall {
    direction: Direction,
    percentage: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct WireRound {
    prediction: WireCall,
    actual: WireCall,
    score: f64,
}

impl From<WireRound> for Round {
    fn from(wire: WireRound) -> Self {
        Self::new(
            wire.prediction.direction,
            wire.prediction.percentage,
            wire.actual.direction,
            wire.actual.percentage,
            wire.score,
        )
    }
}

impl From<Round> for WireRound {
    fn from(round: Round) -> Self {
        Self {
            prediction: WireCall {
                direction: round.predicted_direction,
                percentage: round.predicted_magnitude,
            },
            actual: WireCall {
                direction: round.actual_direction,
                percentage: round.actual_magnitude,
            },
            score: round.round_score,
        }
    }
}

/// One leaderboard entry attempt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Display name.
    pub player_name: String,
    /// Final score the client reports.
    #[serde(rename = "score")]
    pub claimed_score: f64,
    /// Full round history, in play order.
    pub rounds: Vec<Round>,
}

impl Submission {
    /// Creates a submission.
    #[must_use]
    pub fn new(player_name: impl Into<String>, claimed_score: f64, rounds: Vec<Round>) -> Self {
        Self {
            player_name: player_name.into(),
            claimed_score,
            rounds,
        }
    }
}

/// A persisted leaderboard row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player name.
    pub name: String,
    /// Server-recomputed score.
    pub score: f64,
}

impl LeaderboardEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parsing_is_case_insensitive() {
        assert_eq!("Green".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("GREEN".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("red".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!("Down".parse::<Direction>(), Ok(Direction::Down));
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_flat_candle_is_down() {
        assert_eq!(Direction::from_change(0.0), Direction::Down);
        assert_eq!(Direction::from_change(-0.3), Direction::Down);
        assert_eq!(Direction::from_change(0.01), Direction::Up);
    }

    #[test]
    fn test_submission_from_client_json() {
        let json = r#"{
            "playerName": "alice",
            "score": 181.5,
            "rounds": [
                {
                    "prediction": { "direction": "green", "percentage": 0.8 },
                    "actual": { "direction": "Green", "percentage": 1.1 },
                    "score": 181.5
                }
            ]
        }"#;

        let submission: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.player_name, "alice");
        assert!((submission.claimed_score - 181.5).abs() < f64::EPSILON);
        assert_eq!(submission.rounds.len(), 1);

        let round = submission.rounds[0];
        assert_eq!(round.predicted_direction, Direction::Up);
        assert_eq!(round.actual_direction, Direction::Up);
        assert!((round.actual_magnitude - 1.1).abs() < f64::EPSILON);
        assert!(round.direction_matches());
    }

    #[test]
    fn test_round_serializes_in_client_shape() {
        let round = Round::new(Direction::Up, 1.0, Direction::Down, -0.5, -50.0);
        let value = serde_json::to_value(round).unwrap();

        assert_eq!(value["prediction"]["direction"], "Green");
        assert_eq!(value["actual"]["direction"], "Red");
        assert_eq!(value["score"], -50.0);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let json = r#"{
            "prediction": { "direction": "Green", "percentage": 0.8 },
            "score": 10.0
        }"#;
        assert!(serde_json::from_str::<Round>(json).is_err());
    }

    #[test]
    fn test_unknown_direction_is_rejected() {
        let json = r#"{
            "prediction": { "direction": "Blue", "percentage": 0.8 },
            "actual": { "direction": "Green", "percentage": 1.1 },
            "score": 10.0
        }"#;
        assert!(serde_json::from_str::<Round>(json).is_err());
    }
}
