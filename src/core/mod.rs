//! Core building blocks: errors, players, RNG, clock, configuration.

pub mod clock;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{GameConfig, LeaderboardConfig, DEFAULT_MAX_ENTRIES, MIN_PAIR_COUNT};
pub use error::{CatalogueError, GameError, Result, StorageError};
pub use player::Player;
pub use rng::GameRng;
