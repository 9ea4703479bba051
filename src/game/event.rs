//! Engine notifications.
//!
//! The engine emits a `GameEvent` for each state change and never decides
//! presentation. Callers register listeners and react (redraw, schedule
//! the flip-back of a failed pair, announce the final score).
//!
//! Per flip the order is: `CardFlipped`, then at most one of `MatchFound`
//! or `MatchFailed`, then `GameCompleted` if that match ended the game.

use std::time::Duration;

use crate::cards::Card;
use crate::core::player::Player;

/// Final result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSummary {
    pub player: Player,
    pub score: u64,
    pub card_count: usize,
    pub attempts: u32,
    pub duration: Duration,
    pub is_high_score: bool,
}

/// A state change inside the engine.
///
/// Cards are snapshots taken at emission time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    CardFlipped { card: Card },
    MatchFound { first: Card, second: Card },
    MatchFailed { first: Card, second: Card },
    GameCompleted(GameSummary),
}

impl GameEvent {
    /// Short name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::CardFlipped { .. } => "card_flipped",
            GameEvent::MatchFound { .. } => "match_found",
            GameEvent::MatchFailed { .. } => "match_failed",
            GameEvent::GameCompleted(_) => "game_completed",
        }
    }
}

/// Callback invoked for every emitted event.
pub type EventListener = Box<dyn FnMut(&GameEvent) + Send>;

/// Registered listeners, called in registration order.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<EventListener>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&mut self, event: &GameEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
