//! Deck construction: pairing and shuffling.
//!
//! A deck of `n` pairs holds `2n` cards with symbols `"1"..="n"`, each
//! symbol exactly twice. Ids run `0..2n` in deal order and are then
//! shuffled with the caller's `GameRng`.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardId};
use crate::core::config::MIN_PAIR_COUNT;
use crate::core::error::{GameError, Result};
use crate::core::rng::GameRng;

/// An ordered sequence of cards on the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build the unshuffled deck for `pair_count` pairs.
    pub fn ordered(pair_count: usize) -> Result<Self> {
        if pair_count < MIN_PAIR_COUNT {
            return Err(GameError::invalid_argument(format!(
                "game must have at least {} pairs, got {}",
                MIN_PAIR_COUNT, pair_count
            )));
        }

        let mut cards = Vec::with_capacity(pair_count * 2);
        for pair in 0..pair_count {
            let symbol = (pair + 1).to_string();
            let base = (pair * 2) as u32;
            cards.push(Card::new(CardId::new(base), symbol.clone()));
            cards.push(Card::new(CardId::new(base + 1), symbol));
        }
        Ok(Self { cards })
    }

    /// Build and shuffle a deck for `pair_count` pairs.
    ///
    /// ```
    /// use memory_match::cards::Deck;
    /// use memory_match::core::GameRng;
    ///
    /// let deck = Deck::shuffled(4, &mut GameRng::new(1)).unwrap();
    /// assert_eq!(deck.len(), 8);
    /// assert_eq!(deck.unmatched_pairs(), 4);
    /// ```
    pub fn shuffled(pair_count: usize, rng: &mut GameRng) -> Result<Self> {
        let mut deck = Self::ordered(pair_count)?;
        rng.shuffle(&mut deck.cards);
        Ok(deck)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Read-only view of the cards in table order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Card> {
        self.cards.get_mut(index)
    }

    /// Pairs not yet matched.
    #[must_use]
    pub fn unmatched_pairs(&self) -> usize {
        self.cards.iter().filter(|c| !c.is_matched()).count() / 2
    }

    /// Table position of the card with `id`.
    #[must_use]
    pub fn position_of(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id() == id)
    }
}
