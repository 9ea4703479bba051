//! A single memory card.
//!
//! `Card` couples an immutable identity (id + symbol) with the two flags the
//! engine drives during play. The flags keep `matched ⇒ face_up`.

use serde::{Deserialize, Serialize};

/// Unique card identifier within one deck.
///
/// Ids are assigned sequentially at deal time, before shuffling, so cards
/// `2k` and `2k + 1` always share a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A card on the table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    symbol: String,
    face_up: bool,
    matched: bool,
}

impl Card {
    /// Create a face-down, unmatched card.
    #[must_use]
    pub fn new(id: CardId, symbol: impl Into<String>) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            face_up: false,
            matched: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.matched
    }

    /// Check whether two cards form a pair.
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.id != other.id && self.symbol == other.symbol
    }

    /// Toggle the face.
    pub fn flip(&mut self) {
        self.face_up = !self.face_up;
    }

    /// Lock the card as part of a found pair. Forces the card face up.
    pub fn set_matched(&mut self) {
        self.matched = true;
        self.face_up = true;
    }

    /// Return to the freshly dealt state.
    pub fn reset(&mut self) {
        self.face_up = false;
        self.matched = false;
    }
}
