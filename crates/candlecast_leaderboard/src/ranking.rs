//! # Ranking
//!
//! Merges accepted scores into the stored top-N list.
//!
//! ## Concurrency
//!
//! `record` is a read-modify-write against the store. Two submissions
//! interleaving get/set would silently lose one of them, so the whole
//! sequence runs under a single writer lock.

use candlecast_shared::{LeaderboardEntry, LEADERBOARD_SIZE};
use parking_lot::Mutex;
use tracing::info;

use crate::error::StoreResult;
use crate::store::LeaderboardStore;

/// Top-N leaderboard over a store.
#[derive(Debug)]
pub struct Leaderboard<S> {
    /// Backing store.
    store: S,
    /// Number of entries kept.
    capacity: usize,
    /// Serializes `record`.
    write_lock: Mutex<()>,
}

impl<S: LeaderboardStore> Leaderboard<S> {
    /// Creates a leaderboard keeping at most `capacity` entries.
    #[must_use]
    pub const fn new(store: S, capacity: usize) -> Self {
        Self {
            store,
            capacity,
            write_lock: Mutex::new(()),
        }
    }

    /// Maximum number of entries kept.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the current list, best first.
    ///
    /// # Errors
    ///
    /// Store read failure.
    pub fn entries(&self) -> StoreResult<Vec<LeaderboardEntry>> {
        self.store.get()
    }

    /// Adds a score and returns the updated list.
    ///
    /// Entries are sorted by score descending. Ties keep insertion order,
    /// so an earlier score outranks a later equal one. The list is then
    /// cut to capacity.
    ///
    /// # Errors
    ///
    /// Store read or write failure. The stored list is unchanged on a
    /// read failure.
    pub fn record(&self, name: &str, score: f64) -> StoreResult<Vec<LeaderboardEntry>> {
        let _guard = self.write_lock.lock();

        let mut entries = self.store.get()?;
        entries.push(LeaderboardEntry::new(name, score));
        rank(&mut entries, self.capacity);
        self.store.set(&entries)?;

        let position = entries
            .iter()
            .position(|e| e.name == name && e.score.total_cmp(&score).is_eq());
        info!(
            player = name,
            score,
            rank = position.map(|p| p + 1),
            "Score recorded"
        );

        Ok(entries)
    }
}

impl<S: LeaderboardStore + Default> Default for Leaderboard<S> {
    fn default() -> Self {
        Self::new(S::default(), LEADERBOARD_SIZE)
    }
}

/// Stable sort by score descending, then truncate.
fn rank(entries: &mut Vec<LeaderboardEntry>, capacity: usize) {
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
    entries.truncate(capacity);
}
