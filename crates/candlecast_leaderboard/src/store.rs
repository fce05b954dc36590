//! # Leaderboard Stores
//!
//! A store holds one value: the current leaderboard list. It has no
//! invariants of its own beyond returning the most recently set value.
//!
//! ## Backends
//!
//! - [`MemoryStore`]: process-local, lost on restart
//! - [`FileStore`]: pretty-printed JSON file, replaced atomically on write

use candlecast_shared::LeaderboardEntry;
use parking_lot::RwLock;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Get/set contract for the persisted leaderboard.
pub trait LeaderboardStore: Send + Sync {
    /// Returns the stored list (empty if nothing was stored yet).
    ///
    /// # Errors
    ///
    /// Backend-specific I/O or decoding failures.
    fn get(&self) -> StoreResult<Vec<LeaderboardEntry>>;

    /// Replaces the stored list.
    ///
    /// # Errors
    ///
    /// Backend-specific I/O or encoding failures.
    fn set(&self, entries: &[LeaderboardEntry]) -> StoreResult<()>;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Current list.
    entries: RwLock<Vec<LeaderboardEntry>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `entries`.
    #[must_use]
    pub fn with_entries(entries: Vec<LeaderboardEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }
}

impl LeaderboardStore for MemoryStore {
    fn get(&self) -> StoreResult<Vec<LeaderboardEntry>> {
        Ok(self.entries.read().clone())
    }

    fn set(&self, entries: &[LeaderboardEntry]) -> StoreResult<()> {
        *self.entries.write() = entries.to_vec();
        Ok(())
    }
}

/// JSON file store.
///
/// A missing file reads as an empty leaderboard. The parent directory is
/// created on first write. Writes go to a sibling temp file which is then
/// renamed over the target, so a crash mid-write leaves the old list intact.
#[derive(Clone, Debug)]
pub struct FileStore {
    /// Target file.
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by `path`. Nothing is touched until first use.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the temp file used during writes.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl LeaderboardStore for FileStore {
    fn get(&self) -> StoreResult<Vec<LeaderboardEntry>> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Self::io_error(&self.path, e)),
        };
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    fn set(&self, entries: &[LeaderboardEntry]) -> StoreResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| Self::io_error(dir, e))?;
        }

        let temp = self.temp_path();
        {
            let file = File::create(&temp).map_err(|e| Self::io_error(&temp, e))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, entries)?;
            writer.flush().map_err(|e| Self::io_error(&temp, e))?;
            writer
                .get_ref()
                .sync_all()
                .map_err(|e| Self::io_error(&temp, e))?;
        }
        fs::rename(&temp, &self.path).map_err(|e| Self::io_error(&self.path, e))?;

        debug!(path = %self.path.display(), entries = entries.len(), "Leaderboard saved");
        Ok(())
    }
}

impl<S: LeaderboardStore + ?Sized> LeaderboardStore for Box<S> {
    fn get(&self) -> StoreResult<Vec<LeaderboardEntry>> {
        (**self).get()
    }

    fn set(&self, entries: &[LeaderboardEntry]) -> StoreResult<()> {
        (**self).set(entries)
    }
}
