//! # CANDLECAST Leaderboard
//!
//! Persistence for the shared top-N list.
//!
//! ## Design Principles
//!
//! 1. **Dumb stores** - a store only returns the most recently set list
//! 2. **One writer at a time** - [`Leaderboard`] holds a lock across the whole
//!    read-modify-write, so two simultaneous submissions cannot drop each other
//! 3. **Trusted input only** - callers record the verifier's recomputed score
//!
//! ## Example
//!
//! ```rust,ignore
//! use candlecast_leaderboard::{FileStore, Leaderboard};
//!
//! let board = Leaderboard::new(FileStore::new("data/leaderboard.json"), 10);
//! let top = board.record("alice", 5938.5)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod ranking;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use ranking::Leaderboard;
pub use store::{FileStore, LeaderboardStore, MemoryStore};
