//! High-score records and their persisted representation.
//!
//! The document layout is a JSON array of camelCase objects:
//!
//! ```json
//! [{ "id": 1, "playerName": "Ada", "score": 800, "cardCount": 4,
//!    "attempts": 2, "duration": 10.0, "date": "2026-10-16T09:30:00Z" }]
//! ```
//!
//! `duration` is fractional seconds; `date` is RFC 3339.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::player::Player;

/// One finished game worth remembering.
///
/// Fields are fixed at construction. The store fills in `id` when the
/// record is saved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    player_name: String,
    score: u64,
    card_count: u32,
    attempts: u32,
    #[serde(with = "duration_secs")]
    duration: Duration,
    date: DateTime<Utc>,
}

impl HighScoreRecord {
    /// Create a record dated now.
    #[must_use]
    pub fn new(player: &Player, score: u64, card_count: u32, attempts: u32, duration: Duration) -> Self {
        Self {
            id: None,
            player_name: player.name().to_string(),
            score,
            card_count,
            attempts,
            duration,
            date: Utc::now(),
        }
    }

    /// Override the record date.
    #[must_use]
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub(crate) fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    #[must_use]
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn card_count(&self) -> u32 {
        self.card_count
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }
}

/// `Duration` as fractional seconds.
mod duration_secs {
    use std::time::Duration;

    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(de::Error::custom)
    }
}
