//! # CANDLECAST Server
//!
//! HTTP boundary for score submission.
//!
//! ## Request Flow
//!
//! ```text
//! POST /api/leaderboard
//!   │
//!   ├─ decode body ──────────── fail ─► 400 Malformed submission
//!   ├─ plausibility checks ──── fail ─► 400 Invalid score detected
//!   ├─ recompute + tolerance ── fail ─► 400 Score mismatch detected
//!   └─ record recomputed score ────────► 200 top list
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use logging::log_filter;
pub use routes::build_app;
pub use state::AppState;
