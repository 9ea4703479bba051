//! Game engine: turn resolution, scoring, and notifications.
//!
//! ## Key Types
//!
//! - `MemoryGame`: One session; owns the deck and turn state
//! - `FlipOutcome`: What a flip did, returned to the caller
//! - `GameEvent`: Notifications delivered to registered listeners
//! - `GameSummary`: Final result of a completed game
//! - `calculate_score`: The pure score formula

pub mod engine;
pub mod event;
pub mod scoring;

pub use engine::{FlipOutcome, MemoryGame};
pub use event::{EventBus, EventListener, GameEvent, GameSummary};
pub use scoring::{calculate_score, MIN_SCORING_DURATION};
