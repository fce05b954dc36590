//! # Leaderboard Routes
//!
//! Handlers never reveal which check tripped. Detail goes to the log,
//! the client gets one of three fixed messages.

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use candlecast_security::SubmissionError;
use candlecast_shared::{LeaderboardEntry, Submission};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::state::AppState;

/// Message returned with an accepted submission.
pub const SUBMITTED_MESSAGE: &str = "Score submitted successfully";

/// Message returned when the store cannot be read or written.
pub const UNAVAILABLE_MESSAGE: &str = "Leaderboard unavailable";

/// Success body for `POST /api/leaderboard`.
#[derive(Debug, Serialize)]
struct SubmitResponse {
    message: &'static str,
    leaderboard: Vec<LeaderboardEntry>,
}

/// Error body shared by every failure.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Failure at the HTTP boundary.
#[derive(Debug)]
enum ApiError {
    /// Submission refused by the referee (or undecodable).
    Rejected(SubmissionError),
    /// Store or worker failure.
    Unavailable,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::Rejected(err) => (StatusCode::BAD_REQUEST, err.public_message()),
            Self::Unavailable => (StatusCode::INTERNAL_SERVER_ERROR, UNAVAILABLE_MESSAGE),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Builds the router.
pub fn build_app(state: AppState) -> Router {
    let body_limit = state.max_body_bytes;

    Router::new()
        .route(
            "/api/leaderboard",
            get(get_leaderboard).post(submit_score),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

async fn get_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let leaderboard = state.leaderboard.clone();
    let entries = tokio::task::spawn_blocking(move || leaderboard.entries())
        .await
        .map_err(|e| {
            error!(error = %e, "Leaderboard read task failed");
            ApiError::Unavailable
        })?
        .map_err(|e| {
            error!(error = %e, "Leaderboard read failed");
            ApiError::Unavailable
        })?;

    Ok(Json(entries))
}

async fn submit_score(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SubmitResponse>, ApiError> {
    let submission: Submission = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, bytes = body.len(), "Malformed submission");
        ApiError::Rejected(SubmissionError::MalformedInput(e.to_string()))
    })?;

    let recomputed = state.verifier.check(&submission).map_err(|e| {
        warn!(
            player = %submission.player_name,
            rounds = submission.rounds.len(),
            claimed = submission.claimed_score,
            reason = %e,
            "Submission rejected"
        );
        ApiError::Rejected(e)
    })?;

    let leaderboard = state.leaderboard.clone();
    let player = submission.player_name.clone();
    let top = tokio::task::spawn_blocking(move || leaderboard.record(&player, recomputed))
        .await
        .map_err(|e| {
            error!(error = %e, "Leaderboard write task failed");
            ApiError::Unavailable
        })?
        .map_err(|e| {
            error!(error = %e, "Leaderboard write failed");
            ApiError::Unavailable
        })?;

    info!(
        player = %submission.player_name,
        claimed = submission.claimed_score,
        recomputed,
        "Submission accepted"
    );

    Ok(Json(SubmitResponse {
        message: SUBMITTED_MESSAGE,
        leaderboard: top,
    }))
}
