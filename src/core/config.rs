//! Game and leaderboard configuration.
//!
//! - `GameConfig`: Deal size and optional fixed seed
//! - `LeaderboardConfig`: Capacity of the high-score table
//!
//! Both are plain data with builders and a `validate` step; constructors
//! that consume them call `validate` before touching any state.

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};

/// Smallest deal the engine accepts.
pub const MIN_PAIR_COUNT: usize = 2;

/// Default leaderboard capacity.
pub const DEFAULT_MAX_ENTRIES: usize = 10;

/// Configuration for a single game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of symbol pairs dealt. The deck holds twice as many cards.
    pub pair_count: usize,

    /// Fixed shuffle seed. `None` seeds the shuffle from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pair_count: 8,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a config for `pair_count` pairs with an entropy seed.
    #[must_use]
    pub fn new(pair_count: usize) -> Self {
        Self {
            pair_count,
            seed: None,
        }
    }

    #[must_use]
    pub fn with_pair_count(mut self, pair_count: usize) -> Self {
        self.pair_count = pair_count;
        self
    }

    /// Fix the shuffle seed for a reproducible deal.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.pair_count < MIN_PAIR_COUNT {
            return Err(GameError::invalid_argument(format!(
                "game must have at least {} pairs, got {}",
                MIN_PAIR_COUNT, self.pair_count
            )));
        }
        Ok(())
    }
}

/// Configuration for a leaderboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Maximum records retained.
    pub max_entries: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl LeaderboardConfig {
    #[must_use]
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(GameError::invalid_argument("leaderboard must hold at least one entry"));
        }
        Ok(())
    }
}
