//! Bounded, score-ranked leaderboard over a storage port.
//!
//! ## Ordering
//!
//! Records are kept sorted by descending score with a stable sort, so among
//! equal scores the earlier-submitted record ranks higher. At capacity a new
//! record tying the lowest score is therefore the one evicted.
//!
//! ## Failure policy
//!
//! Storage errors never escape. A failed load starts an empty table; a
//! failed save keeps the in-memory table authoritative. Both are logged at
//! `warn`.

use tracing::{debug, info, warn};

use super::record::HighScoreRecord;
use super::repository::HighScoreRepository;
use super::storage::{MemoryStorage, ScoreStorage};
use crate::core::config::LeaderboardConfig;
use crate::core::error::Result;

/// The high-score table.
#[derive(Debug)]
pub struct Leaderboard<S: ScoreStorage> {
    records: Vec<HighScoreRecord>,
    max_entries: usize,
    storage: S,
}

impl<S: ScoreStorage> Leaderboard<S> {
    /// Open a leaderboard, loading whatever the storage holds.
    ///
    /// Fails only on an invalid config.
    pub fn open(storage: S, config: LeaderboardConfig) -> Result<Self> {
        config.validate()?;

        let mut records = match storage.load() {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "failed to load high scores, starting with an empty leaderboard");
                Vec::new()
            }
        };
        rank(&mut records, config.max_entries);

        Ok(Self {
            records,
            max_entries: config.max_entries,
            storage,
        })
    }

    #[must_use]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All retained records, highest score first.
    #[must_use]
    pub fn records(&self) -> &[HighScoreRecord] {
        &self.records
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// One past the highest id held. `None` once the id space is used up.
    fn next_id(&self) -> Option<u64> {
        match self.records.iter().filter_map(HighScoreRecord::id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    fn persist(&mut self) {
        if let Err(err) = self.storage.save(&self.records) {
            warn!(error = %err, "failed to save high scores, keeping in-memory leaderboard");
        }
    }
}

impl Leaderboard<MemoryStorage> {
    /// A leaderboard that lives only as long as the process.
    pub fn in_memory(max_entries: usize) -> Result<Self> {
        Self::open(MemoryStorage::new(), LeaderboardConfig::default().with_max_entries(max_entries))
    }
}

impl<S: ScoreStorage> HighScoreRepository for Leaderboard<S> {
    fn is_high_score(&self, score: u64) -> bool {
        self.records.len() < self.max_entries || self.records.iter().any(|r| r.score() < score)
    }

    fn save_record(&mut self, record: HighScoreRecord) {
        let record = match (record.id(), self.next_id()) {
            (Some(_), _) => record,
            (None, Some(id)) => record.with_id(id),
            (None, None) => {
                warn!("record ids exhausted, saving high score without an id");
                record
            }
        };
        let score = record.score();
        // Stable sort places the new record after every equal score.
        let position = self.records.iter().filter(|r| r.score() >= score).count();

        self.records.push(record);
        rank(&mut self.records, self.max_entries);

        if position < self.max_entries {
            info!(score, rank = position + 1, "new high score");
        } else {
            debug!(score, "record did not make the leaderboard");
        }

        self.persist();
    }

    fn top_scores(&self, count: usize) -> Vec<HighScoreRecord> {
        self.records.iter().take(count).cloned().collect()
    }
}

/// Sort descending by score (stable) and drop everything past `max_entries`.
fn rank(records: &mut Vec<HighScoreRecord>, max_entries: usize) {
    records.sort_by(|a, b| b.score().cmp(&a.score()));
    records.truncate(max_entries);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::StorageError;
    use crate::core::Player;
    use std::time::Duration;

    fn record(name: &str, score: u64) -> HighScoreRecord {
        let player = Player::new(name).unwrap();
        HighScoreRecord::new(&player, score, 10, 5, Duration::from_secs(20))
    }

    fn scores<S: ScoreStorage>(board: &Leaderboard<S>) -> Vec<u64> {
        board.records().iter().map(HighScoreRecord::score).collect()
    }

    struct FailingStorage;

    impl ScoreStorage for FailingStorage {
        fn load(&self) -> std::result::Result<Vec<HighScoreRecord>, StorageError> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk on fire").into())
        }

        fn save(&mut self, _records: &[HighScoreRecord]) -> std::result::Result<(), StorageError> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk on fire").into())
        }
    }

    #[test]
    fn test_empty_board() {
        let board = Leaderboard::in_memory(10).unwrap();
        assert!(board.is_empty());
        assert!(board.top_scores(10).is_empty());
        assert!(board.is_high_score(0));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(Leaderboard::in_memory(0).is_err());
    }

    #[test]
    fn test_bounded_ranking() {
        let mut board = Leaderboard::in_memory(3).unwrap();
        for score in [1000, 1500, 800, 1200, 500] {
            board.save_record(record("p", score));
        }
        assert_eq!(scores(&board), vec![1500, 1200, 1000]);
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn test_is_high_score_at_capacity() {
        let mut board = Leaderboard::in_memory(2).unwrap();
        board.save_record(record("a", 100));
        assert!(board.is_high_score(1));

        board.save_record(record("b", 200));
        assert!(!board.is_high_score(50));
        assert!(!board.is_high_score(100));
        assert!(board.is_high_score(101));
    }

    #[test]
    fn test_ties_keep_submission_order() {
        let mut board = Leaderboard::in_memory(2).unwrap();
        board.save_record(record("first", 500));
        board.save_record(record("second", 500));
        board.save_record(record("third", 500));

        let names: Vec<_> = board.records().iter().map(|r| r.player_name().to_string()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_ids_assigned_sequentially() {
        let mut board = Leaderboard::in_memory(10).unwrap();
        board.save_record(record("a", 1));
        board.save_record(record("b", 2));
        let mut ids: Vec<_> = board.records().iter().filter_map(HighScoreRecord::id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_exhausted_id_space_saves_without_id() {
        let top = record("max", 900).with_id(u64::MAX);
        let storage = MemoryStorage::with_records(vec![top]);
        let mut board = Leaderboard::open(storage, LeaderboardConfig::default()).unwrap();

        board.save_record(record("next", 100));

        assert_eq!(scores(&board), vec![900, 100]);
        assert_eq!(board.records()[0].id(), Some(u64::MAX));
        assert_eq!(board.records()[1].id(), None);
        assert_eq!(board.storage().save_count(), 1);
    }

    #[test]
    fn test_save_persists_full_collection() {
        let mut board = Leaderboard::in_memory(10).unwrap();
        board.save_record(record("a", 10));
        board.save_record(record("b", 30));

        assert_eq!(board.storage().save_count(), 2);
        let persisted: Vec<_> = board.storage().records().iter().map(|r| r.score()).collect();
        assert_eq!(persisted, vec![30, 10]);
    }

    #[test]
    fn test_load_reranks_and_truncates() {
        let storage = MemoryStorage::with_records(vec![record("a", 5), record("b", 50), record("c", 20)]);
        let board = Leaderboard::open(storage, LeaderboardConfig::default().with_max_entries(2)).unwrap();
        assert_eq!(scores(&board), vec![50, 20]);
    }

    #[test]
    fn test_top_scores_limits() {
        let mut board = Leaderboard::in_memory(10).unwrap();
        for score in [3, 9, 6] {
            board.save_record(record("p", score));
        }
        let top: Vec<_> = board.top_scores(2).iter().map(HighScoreRecord::score).collect();
        assert_eq!(top, vec![9, 6]);
        assert_eq!(board.top_scores(100).len(), 3);
        assert!(board.top_scores(0).is_empty());
    }

    #[test]
    fn test_storage_failures_are_absorbed() {
        let mut board = Leaderboard::open(FailingStorage, LeaderboardConfig::default()).unwrap();
        assert!(board.is_empty());

        board.save_record(record("a", 42));
        assert_eq!(scores(&board), vec![42]);
        assert_eq!(board.top_scores(1)[0].player_name(), "a");
    }
}
