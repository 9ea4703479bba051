//! # memory-match
//!
//! A matching-pairs card game engine with a bounded, score-ranked
//! leaderboard.
//!
//! ## Design Principles
//!
//! 1. **Engine emits, caller presents**: The engine resolves turns and
//!    emits typed events. Rendering, delays and the flip-back of a failed
//!    pair belong to the caller.
//!
//! 2. **Validate, then mutate**: Every rejected call leaves the game
//!    exactly as it was.
//!
//! 3. **Storage never breaks a game**: The leaderboard logs persistence
//!    failures and keeps its in-memory table authoritative.
//!
//! ## Modules
//!
//! - `core`: Errors, players, RNG, clock, configuration
//! - `cards`: Cards and deck construction
//! - `game`: The `MemoryGame` engine, events and scoring
//! - `leaderboard`: High-score records, the ranked store and storage ports
//! - `catalogue`: Custom card images and their JSON-backed store
//! - `logging`: Subscriber setup for binaries

pub mod cards;
pub mod catalogue;
pub mod core;
pub mod game;
pub mod leaderboard;
pub mod logging;

// Re-export commonly used types
pub use crate::core::{
    CatalogueError, Clock, GameConfig, GameError, GameRng, LeaderboardConfig, ManualClock, Player, Result,
    StorageError, SystemClock,
};

pub use crate::cards::{Card, CardId, Deck};

pub use crate::game::{calculate_score, EventBus, FlipOutcome, GameEvent, GameSummary, MemoryGame};

pub use crate::leaderboard::{
    HighScoreRecord, HighScoreRepository, JsonFileStorage, Leaderboard, MemoryStorage, ScoreStorage,
};

pub use crate::catalogue::{CardImage, CardImageRepository, ImageCatalogue, ImageStorage};
