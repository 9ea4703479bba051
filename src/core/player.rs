//! Player identity.

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};

/// The person playing a game.
///
/// The name is validated on construction and never empty afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    name: String,
}

impl Player {
    /// Create a player, rejecting empty or whitespace-only names.
    ///
    /// ```
    /// use memory_match::core::Player;
    ///
    /// assert_eq!(Player::new("Ada").unwrap().name(), "Ada");
    /// assert!(Player::new("   ").is_err());
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GameError::invalid_argument("player name cannot be empty"));
        }
        Ok(Self { name })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
