//! Persistence ports for the leaderboard.
//!
//! A `ScoreStorage` loads and saves the whole record collection at once.
//! Errors are reported to the caller; the `Leaderboard` decides that they
//! are non-fatal.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::record::HighScoreRecord;
use crate::core::error::StorageError;

/// Whole-collection persistence for high-score records.
pub trait ScoreStorage {
    /// Read every stored record. A missing source is an empty collection.
    fn load(&self) -> Result<Vec<HighScoreRecord>, StorageError>;

    /// Replace the stored collection.
    fn save(&mut self, records: &[HighScoreRecord]) -> Result<(), StorageError>;
}

/// A pretty-printed JSON array kept in a single file.
///
/// Saves go through a sibling temp file and a rename, so readers see either
/// the old document or the new one. The same file type backs both the
/// leaderboard and the card image catalogue.
#[derive(Clone, Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Read the whole array. A missing or blank file is an empty array.
    pub(crate) fn read_array<T: DeserializeOwned>(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no document yet");
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&self.path)?;
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&json)?)
    }

    /// Replace the whole array, creating the parent directory if needed.
    pub(crate) fn write_array<T: Serialize>(&self, items: &[T]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(items)?;
        let temp = self.temp_path();
        fs::write(&temp, json)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

impl ScoreStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<HighScoreRecord>, StorageError> {
        let records: Vec<HighScoreRecord> = self.read_array()?;
        debug!(path = %self.path.display(), count = records.len(), "loaded high scores");
        Ok(records)
    }

    fn save(&mut self, records: &[HighScoreRecord]) -> Result<(), StorageError> {
        self.write_array(records)?;
        debug!(path = %self.path.display(), count = records.len(), "saved high scores");
        Ok(())
    }
}

/// Records kept in process memory only.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    records: Vec<HighScoreRecord>,
    save_count: usize,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with records already "on disk".
    #[must_use]
    pub fn with_records(records: Vec<HighScoreRecord>) -> Self {
        Self { records, save_count: 0 }
    }

    /// The last saved collection.
    #[must_use]
    pub fn records(&self) -> &[HighScoreRecord] {
        &self.records
    }

    /// How many times `save` has been called.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl ScoreStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<HighScoreRecord>, StorageError> {
        Ok(self.records.clone())
    }

    fn save(&mut self, records: &[HighScoreRecord]) -> Result<(), StorageError> {
        self.records = records.to_vec();
        self.save_count += 1;
        Ok(())
    }
}
