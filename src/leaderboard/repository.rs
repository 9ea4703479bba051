//! The high-score interface the game engine depends on.

use std::sync::{Arc, Mutex, PoisonError};

use super::record::HighScoreRecord;

/// A ranked high-score table.
///
/// Saving never fails from the caller's point of view: implementations that
/// persist must log and absorb storage errors.
pub trait HighScoreRepository {
    /// Would `score` earn a place on the table?
    fn is_high_score(&self, score: u64) -> bool;

    /// Insert a record, keeping the table ranked and bounded.
    fn save_record(&mut self, record: HighScoreRecord);

    /// Up to `count` best records, highest score first.
    fn top_scores(&self, count: usize) -> Vec<HighScoreRecord>;
}

impl<R: HighScoreRepository + ?Sized> HighScoreRepository for &mut R {
    fn is_high_score(&self, score: u64) -> bool {
        (**self).is_high_score(score)
    }

    fn save_record(&mut self, record: HighScoreRecord) {
        (**self).save_record(record);
    }

    fn top_scores(&self, count: usize) -> Vec<HighScoreRecord> {
        (**self).top_scores(count)
    }
}

/// Shared table: the engine writes while other owners keep querying.
impl<R: HighScoreRepository> HighScoreRepository for Arc<Mutex<R>> {
    fn is_high_score(&self, score: u64) -> bool {
        self.lock().unwrap_or_else(PoisonError::into_inner).is_high_score(score)
    }

    fn save_record(&mut self, record: HighScoreRecord) {
        self.lock().unwrap_or_else(PoisonError::into_inner).save_record(record);
    }

    fn top_scores(&self, count: usize) -> Vec<HighScoreRecord> {
        self.lock().unwrap_or_else(PoisonError::into_inner).top_scores(count)
    }
}
