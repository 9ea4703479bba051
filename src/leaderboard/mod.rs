//! High-score leaderboard.
//!
//! ## Key Types
//!
//! - `HighScoreRecord`: One finished game, as persisted
//! - `HighScoreRepository`: What the game engine needs from a table
//! - `Leaderboard`: Ranked, capacity-bounded table over a storage port
//! - `ScoreStorage`: Load/save port, with `JsonFileStorage` and `MemoryStorage`

pub mod record;
pub mod repository;
pub mod storage;
pub mod store;

pub use record::HighScoreRecord;
pub use repository::HighScoreRepository;
pub use storage::{JsonFileStorage, MemoryStorage, ScoreStorage};
pub use store::Leaderboard;
