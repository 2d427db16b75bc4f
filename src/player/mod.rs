//! Player trait and implementations
//!
//! A player only sees what a presenter sees: the stream of [`GameEvent`]s.
//! - AiPlayer: remembers revealed symbols and completes known pairs
//! - cli: parses typed commands for a human player

use alloc::vec::Vec;

use rand::rngs::SmallRng;

use crate::core::{
    card::{CardState, CardView},
    common::GameSummary,
    event::GameEvent,
    headless::HeadlessGame,
};

/// Interface implemented by different player types.
pub trait Player {
    /// Inform the player of a state change on the board.
    fn observe(&mut self, event: &GameEvent);

    /// Choose the next card to reveal, or `None` to wait.
    fn select_card(&mut self, rng: &mut SmallRng) -> Option<usize>;
}

/// Board as seen through events, rebuilt from [`GameEvent::BoardReady`] on.
#[derive(Debug, Clone, Default)]
pub struct BoardTracker {
    cards: Vec<CardView>,
    columns: usize,
    difficulty: &'static str,
}

impl BoardTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::BoardReady {
                difficulty,
                columns,
                cards,
            } => {
                self.cards = cards.clone();
                self.columns = *columns;
                self.difficulty = *difficulty;
            }
            GameEvent::CardRevealed { position, symbol } => {
                if let Some(card) = self.cards.get_mut(*position) {
                    card.state = CardState::Revealed;
                    card.symbol = Some(*symbol);
                }
            }
            GameEvent::CardsMatched { positions } => {
                for p in positions {
                    if let Some(card) = self.cards.get_mut(*p) {
                        card.state = CardState::Matched;
                    }
                }
            }
            GameEvent::CardsReverted { positions } => {
                for p in positions {
                    if let Some(card) = self.cards.get_mut(*p) {
                        *card = CardView::hidden(*p);
                    }
                }
            }
            _ => {}
        }
    }

    pub fn cards(&self) -> &[CardView] {
        &self.cards
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn difficulty(&self) -> &'static str {
        self.difficulty
    }

    /// Positions currently face up and unmatched.
    pub fn face_up(&self) -> Vec<usize> {
        self.positions_in(CardState::Revealed)
    }

    pub fn hidden(&self) -> Vec<usize> {
        self.positions_in(CardState::Hidden)
    }

    fn positions_in(&self, state: CardState) -> Vec<usize> {
        self.cards
            .iter()
            .filter(|c| c.state == state)
            .map(|c| c.position)
            .collect()
    }
}

/// Let `player` finish the current board of `game`, spending `think_ms` of
/// virtual time before each reveal. Gives up after `max_reveals` reveals or
/// when the player stops choosing cards while nothing is pending.
pub fn autoplay<P: Player + ?Sized>(
    game: &mut HeadlessGame,
    player: &mut P,
    rng: &mut SmallRng,
    think_ms: u64,
    max_reveals: usize,
) -> Option<GameSummary> {
    let mut reveals = 0;
    loop {
        for event in game.drain_events() {
            player.observe(&event);
            if matches!(event, GameEvent::GameWon { .. }) {
                return game.engine().summary().cloned();
            }
        }
        if reveals >= max_reveals {
            return None;
        }
        match player.select_card(rng) {
            Some(position) => {
                game.advance(think_ms);
                game.reveal(position);
                reveals += 1;
            }
            None if game.pending_callbacks() == 0 => return None,
            None => game.settle(),
        }
    }
}

pub mod ai;
pub use ai::AiPlayer;

#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
pub use cli::parse_command;
