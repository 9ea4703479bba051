//! The memory game engine.
//!
//! ## Turn state machine
//!
//! A turn is two flips. The first flip only remembers the card. The second
//! flip counts an attempt and resolves the turn:
//!
//! - **Match**: both cards lock face up; the last pair completes the game.
//! - **No match**: both stay face up. The caller turns them back with
//!   `flip_card_back` whenever it likes; the engine runs no timers.
//!
//! ## Completion
//!
//! When no unmatched pairs remain the engine freezes the elapsed time,
//! scores the game, asks the repository whether the score qualifies, saves
//! a record if it does, and emits `GameCompleted`. After that every flip is
//! rejected.
//!
//! ## Threading
//!
//! All calls take `&mut self` and run to completion synchronously. To share
//! a game across threads wrap the whole engine in a `Mutex`.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::event::{EventBus, GameEvent, GameSummary};
use super::scoring::calculate_score;
use crate::cards::{Card, Deck};
use crate::core::clock::{Clock, SystemClock};
use crate::core::config::GameConfig;
use crate::core::error::{GameError, Result};
use crate::core::player::Player;
use crate::core::rng::GameRng;
use crate::leaderboard::{HighScoreRecord, HighScoreRepository};

/// What a successful `flip_card` did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// First card of a turn; waiting for the second.
    FirstSelected,
    /// The two cards matched and the game goes on.
    Matched { first: usize, second: usize },
    /// The two cards differ. Both are still face up.
    Mismatched { first: usize, second: usize },
    /// The final pair was found.
    Completed(GameSummary),
}

/// One game session for one player.
pub struct MemoryGame<R: HighScoreRepository> {
    player: Player,
    deck: Deck,
    first_selected: Option<usize>,
    attempts: u32,
    completed: bool,
    seed: Option<u64>,
    started_at: Instant,
    final_duration: Option<Duration>,
    clock: Box<dyn Clock>,
    repository: R,
    events: EventBus,
}

impl<R: HighScoreRepository> MemoryGame<R> {
    /// Deal a new game of `pair_count` pairs with an entropy-seeded shuffle.
    ///
    /// ```
    /// use memory_match::core::Player;
    /// use memory_match::game::MemoryGame;
    /// use memory_match::leaderboard::Leaderboard;
    ///
    /// let mut board = Leaderboard::in_memory(10).unwrap();
    /// let game = MemoryGame::new(Player::new("Ada").unwrap(), 6, &mut board).unwrap();
    /// assert_eq!(game.card_count(), 12);
    /// assert_eq!(game.remaining_pairs(), 6);
    /// ```
    pub fn new(player: Player, pair_count: usize, repository: R) -> Result<Self> {
        Self::with_config(player, GameConfig::new(pair_count), repository)
    }

    /// Deal a new game from a full config.
    pub fn with_config(player: Player, config: GameConfig, repository: R) -> Result<Self> {
        Self::with_clock(player, config, repository, SystemClock)
    }

    /// Deal a new game measuring time with `clock`.
    pub fn with_clock(
        player: Player,
        config: GameConfig,
        repository: R,
        clock: impl Clock + 'static,
    ) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let deck = Deck::shuffled(config.pair_count, &mut rng)?;
        let started_at = clock.now();

        info!(
            player = %player,
            pairs = config.pair_count,
            seed = ?rng.seed(),
            "new game dealt"
        );

        Ok(Self {
            player,
            deck,
            first_selected: None,
            attempts: 0,
            completed: false,
            seed: rng.seed(),
            started_at,
            final_duration: None,
            clock: Box::new(clock),
            repository,
            events: EventBus::new(),
        })
    }

    /// Register a listener for every future event.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + Send + 'static) {
        self.events.subscribe(listener);
    }

    // === Accessors ===

    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The cards in table order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        self.deck.cards()
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck.len()
    }

    #[must_use]
    pub fn remaining_pairs(&self) -> usize {
        self.deck.unmatched_pairs()
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Index of the first card of the turn in progress, if any.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.first_selected
    }

    /// Seed used for this deal, when it was fixed by the config.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Time since the deal; frozen once the game completes.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.final_duration
            .unwrap_or_else(|| self.clock.now().saturating_duration_since(self.started_at))
    }

    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// End the session and hand the repository back.
    pub fn into_repository(self) -> R {
        self.repository
    }

    // === Actions ===

    /// Turn a face-down card face up and resolve the turn if it is the
    /// second card.
    ///
    /// Fails without changing anything when the game is over, the index is
    /// out of range, or the card is already face up or matched.
    pub fn flip_card(&mut self, index: usize) -> Result<FlipOutcome> {
        if self.completed {
            return Err(GameError::operation_invalid("game is already completed"));
        }
        let card = self.card_at(index)?;
        if card.is_matched() || card.is_face_up() {
            return Err(GameError::operation_invalid(format!(
                "card at index {} cannot be flipped",
                index
            )));
        }

        let flipped = self.card_at_mut(index)?;
        flipped.flip();
        let snapshot = flipped.clone();
        debug!(index, card = %snapshot.id(), symbol = snapshot.symbol(), "card flipped");
        self.emit(GameEvent::CardFlipped { card: snapshot });

        let Some(first) = self.first_selected.take() else {
            self.first_selected = Some(index);
            return Ok(FlipOutcome::FirstSelected);
        };

        self.attempts += 1;
        if self.card_at(first)?.pairs_with(self.card_at(index)?) {
            self.card_at_mut(first)?.set_matched();
            self.card_at_mut(index)?.set_matched();
            debug!(first, second = index, attempts = self.attempts, "match found");
            self.emit_pair(first, index, true)?;

            if self.remaining_pairs() == 0 {
                return Ok(FlipOutcome::Completed(self.complete()));
            }
            Ok(FlipOutcome::Matched { first, second: index })
        } else {
            debug!(first, second = index, attempts = self.attempts, "match failed");
            self.emit_pair(first, index, false)?;
            Ok(FlipOutcome::Mismatched { first, second: index })
        }
    }

    /// Turn a face-up, unmatched card back down. Anything else is a no-op.
    ///
    /// The turn state is left alone: if this was the first card of an
    /// unfinished turn, the next flip still resolves against it. A card
    /// never pairs with itself, so re-flipping that same card is a miss.
    pub fn flip_card_back(&mut self, index: usize) -> Result<()> {
        let card = self.card_at_mut(index)?;
        if card.is_face_up() && !card.is_matched() {
            card.flip();
            debug!(index, "card flipped back");
        }
        Ok(())
    }

    // === Internals ===

    fn card_at(&self, index: usize) -> Result<&Card> {
        let card_count = self.deck.len();
        self.deck
            .get(index)
            .ok_or(GameError::IndexOutOfRange { index, card_count })
    }

    fn card_at_mut(&mut self, index: usize) -> Result<&mut Card> {
        let card_count = self.deck.len();
        self.deck
            .get_mut(index)
            .ok_or(GameError::IndexOutOfRange { index, card_count })
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.emit(&event);
    }

    fn emit_pair(&mut self, first: usize, second: usize, matched: bool) -> Result<()> {
        let first = self.card_at(first)?.clone();
        let second = self.card_at(second)?.clone();
        let event = if matched {
            GameEvent::MatchFound { first, second }
        } else {
            GameEvent::MatchFailed { first, second }
        };
        self.emit(event);
        Ok(())
    }

    fn complete(&mut self) -> GameSummary {
        let duration = self.clock.now().saturating_duration_since(self.started_at);
        self.final_duration = Some(duration);

        let card_count = self.deck.len();
        let score = calculate_score(card_count, duration, self.attempts);
        let is_high_score = self.repository.is_high_score(score);
        if is_high_score {
            self.repository.save_record(HighScoreRecord::new(
                &self.player,
                score,
                card_count as u32,
                self.attempts,
                duration,
            ));
        }
        self.completed = true;

        info!(
            player = %self.player,
            score,
            attempts = self.attempts,
            seconds = duration.as_secs_f64(),
            is_high_score,
            "game completed"
        );

        let summary = GameSummary {
            player: self.player.clone(),
            score,
            card_count,
            attempts: self.attempts,
            duration,
            is_high_score,
        };
        self.emit(GameEvent::GameCompleted(summary.clone()));
        summary
    }
}

impl<R: HighScoreRepository> std::fmt::Debug for MemoryGame<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryGame")
            .field("player", &self.player)
            .field("card_count", &self.deck.len())
            .field("remaining_pairs", &self.remaining_pairs())
            .field("attempts", &self.attempts)
            .field("completed", &self.completed)
            .field("seed", &self.seed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use crate::leaderboard::Leaderboard;

    fn player() -> Player {
        Player::new("Tester").unwrap()
    }

    /// Indices of the two cards carrying `symbol`.
    fn pair_of<R: HighScoreRepository>(game: &MemoryGame<R>, symbol: &str) -> (usize, usize) {
        let idx: Vec<_> = game
            .cards()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.symbol() == symbol)
            .map(|(i, _)| i)
            .collect();
        (idx[0], idx[1])
    }

    #[test]
    fn test_new_game_state() {
        let mut board = Leaderboard::in_memory(10).unwrap();
        let game = MemoryGame::new(player(), 4, &mut board).unwrap();

        assert_eq!(game.card_count(), 8);
        assert_eq!(game.remaining_pairs(), 4);
        assert_eq!(game.attempts(), 0);
        assert!(!game.is_completed());
        assert_eq!(game.selected_index(), None);
        assert!(game.cards().iter().all(|c| !c.is_face_up() && !c.is_matched()));
    }

    #[test]
    fn test_pair_count_below_two_rejected() {
        let mut board = Leaderboard::in_memory(10).unwrap();
        for pairs in [0, 1] {
            let err = MemoryGame::new(player(), pairs, &mut board).unwrap_err();
            assert!(matches!(err, GameError::InvalidArgument { .. }));
        }
    }

    #[test]
    fn test_seeded_deals_repeat() {
        let config = GameConfig::new(6).with_seed(17);
        let a = MemoryGame::with_config(player(), config.clone(), Leaderboard::in_memory(3).unwrap()).unwrap();
        let b = MemoryGame::with_config(player(), config, Leaderboard::in_memory(3).unwrap()).unwrap();
        assert_eq!(a.cards(), b.cards());
        assert_eq!(a.seed(), Some(17));
    }

    #[test]
    fn test_first_flip_selects() {
        let mut board = Leaderboard::in_memory(10).unwrap();
        let mut game = MemoryGame::new(player(), 3, &mut board).unwrap();

        assert_eq!(game.flip_card(2).unwrap(), FlipOutcome::FirstSelected);
        assert!(game.cards()[2].is_face_up());
        assert_eq!(game.selected_index(), Some(2));
        assert_eq!(game.attempts(), 0);
    }

    #[test]
    fn test_flip_same_card_twice_rejected() {
        let mut board = Leaderboard::in_memory(10).unwrap();
        let mut game = MemoryGame::new(player(), 3, &mut board).unwrap();

        game.flip_card(0).unwrap();
        let err = game.flip_card(0).unwrap_err();
        assert!(matches!(err, GameError::OperationInvalid { .. }));
        assert_eq!(game.selected_index(), Some(0));
        assert_eq!(game.attempts(), 0);
    }

    #[test]
    fn test_out_of_range() {
        let mut board = Leaderboard::in_memory(10).unwrap();
        let mut game = MemoryGame::new(player(), 2, &mut board).unwrap();

        assert_eq!(
            game.flip_card(4).unwrap_err(),
            GameError::IndexOutOfRange { index: 4, card_count: 4 }
        );
        assert!(matches!(
            game.flip_card_back(99).unwrap_err(),
            GameError::IndexOutOfRange { .. }
        ));
    }

    #[test]
    fn test_match_and_mismatch() {
        let mut board = Leaderboard::in_memory(10).unwrap();
        let mut game = MemoryGame::new(player(), 3, &mut board).unwrap();
        let (a1, a2) = pair_of(&game, "1");
        let (b1, _) = pair_of(&game, "2");

        game.flip_card(a1).unwrap();
        assert_eq!(game.flip_card(b1).unwrap(), FlipOutcome::Mismatched { first: a1, second: b1 });
        assert_eq!(game.attempts(), 1);
        assert!(game.cards()[a1].is_face_up() && game.cards()[b1].is_face_up());

        game.flip_card_back(a1).unwrap();
        game.flip_card_back(b1).unwrap();
        assert!(!game.cards()[a1].is_face_up() && !game.cards()[b1].is_face_up());

        game.flip_card(a1).unwrap();
        assert_eq!(game.flip_card(a2).unwrap(), FlipOutcome::Matched { first: a1, second: a2 });
        assert_eq!(game.attempts(), 2);
        assert!(game.cards()[a1].is_matched() && game.cards()[a2].is_matched());
        assert_eq!(game.remaining_pairs(), 2);
    }

    #[test]
    fn test_flip_back_is_noop_on_matched_and_face_down() {
        let mut board = Leaderboard::in_memory(10).unwrap();
        let mut game = MemoryGame::new(player(), 3, &mut board).unwrap();
        let (a1, a2) = pair_of(&game, "1");
        let (b1, _) = pair_of(&game, "2");

        game.flip_card(a1).unwrap();
        game.flip_card(a2).unwrap();
        game.flip_card_back(a1).unwrap();
        assert!(game.cards()[a1].is_face_up());

        game.flip_card_back(b1).unwrap();
        assert!(!game.cards()[b1].is_face_up());
    }

    #[test]
    fn test_flip_back_of_selected_card_keeps_turn() {
        let mut board = Leaderboard::in_memory(10).unwrap();
        let mut game = MemoryGame::new(player(), 3, &mut board).unwrap();
        let (a1, a2) = pair_of(&game, "1");

        game.flip_card(a1).unwrap();
        game.flip_card_back(a1).unwrap();
        assert!(!game.cards()[a1].is_face_up());
        assert_eq!(game.selected_index(), Some(a1));

        assert_eq!(game.flip_card(a2).unwrap(), FlipOutcome::Matched { first: a1, second: a2 });
        assert_eq!(game.attempts(), 1);
        assert!(game.cards()[a1].is_matched() && game.cards()[a1].is_face_up());
        assert!(game.cards()[a2].is_matched());
    }

    #[test]
    fn test_reflipping_selected_card_is_a_miss() {
        let mut board = Leaderboard::in_memory(10).unwrap();
        let mut game = MemoryGame::new(player(), 3, &mut board).unwrap();

        game.flip_card(0).unwrap();
        game.flip_card_back(0).unwrap();
        assert_eq!(game.flip_card(0).unwrap(), FlipOutcome::Mismatched { first: 0, second: 0 });
        assert_eq!(game.attempts(), 1);
        assert_eq!(game.selected_index(), None);
        assert!(!game.cards()[0].is_matched());
        assert_eq!(game.remaining_pairs(), 3);
    }

    #[test]
    fn test_completion_scores_with_clock() {
        let clock = ManualClock::new();
        let mut board = Leaderboard::in_memory(10).unwrap();
        let mut game =
            MemoryGame::with_clock(player(), GameConfig::new(2), &mut board, clock.clone()).unwrap();
        let (a1, a2) = pair_of(&game, "1");
        let (b1, b2) = pair_of(&game, "2");

        game.flip_card(a1).unwrap();
        game.flip_card(a2).unwrap();
        clock.advance(Duration::from_secs(10));
        game.flip_card(b1).unwrap();
        let outcome = game.flip_card(b2).unwrap();

        let summary = match outcome {
            FlipOutcome::Completed(summary) => summary,
            other => panic!("expected completion, got {:?}", other),
        };
        assert_eq!(summary.score, 800);
        assert_eq!(summary.attempts, 2);
        assert_eq!(summary.card_count, 4);
        assert!(summary.is_high_score);
        assert!(game.is_completed());

        clock.advance(Duration::from_secs(60));
        assert_eq!(game.duration(), Duration::from_secs(10));

        let err = game.flip_card(0).unwrap_err();
        assert!(matches!(err, GameError::OperationInvalid { .. }));

        drop(game);
        assert_eq!(board.top_scores(1)[0].score(), 800);
    }

    #[test]
    fn test_duration_is_live_before_completion() {
        let clock = ManualClock::new();
        let game = MemoryGame::with_clock(
            player(),
            GameConfig::new(2),
            Leaderboard::in_memory(1).unwrap(),
            clock.clone(),
        )
        .unwrap();

        assert_eq!(game.duration(), Duration::ZERO);
        clock.advance(Duration::from_secs(3));
        assert_eq!(game.duration(), Duration::from_secs(3));
    }

    #[test]
    fn test_debug_output() {
        let game = MemoryGame::with_config(
            player(),
            GameConfig::new(2).with_seed(1),
            Leaderboard::in_memory(1).unwrap(),
        )
        .unwrap();
        let debug = format!("{:?}", game);
        assert!(debug.contains("card_count: 4"));
        assert!(debug.contains("seed: Some(1)"));
    }
}
