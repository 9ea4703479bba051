//! Card system: cards and deck construction.
//!
//! ## Key Types
//!
//! - `CardId`: Identity assigned at deal time
//! - `Card`: Symbol plus face-up / matched state
//! - `Deck`: Paired, shuffled card sequence

pub mod card;
pub mod deck;

pub use card::{Card, CardId};
pub use deck::Deck;
