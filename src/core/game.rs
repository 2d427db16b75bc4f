use alloc::string::String;
use alloc::vec::Vec;

use log::{debug, info, trace};
use rand::{rngs::SmallRng, SeedableRng};

use crate::core::{
    card::{Card, CardState, CardView},
    common::{format_clock, GameStatus, GameSummary, IgnoreReason, RevealOutcome},
    config::{
        symbols_for, DifficultyLevel, DEFAULT_DIFFICULTY, DIFFICULTY_LEVELS, FAIR_BONUS,
        GOOD_BONUS, MATCH_POINTS, NUM_DIFFICULTIES, PERFECT_BONUS, QUICK_MATCH_BONUS,
        QUICK_MATCH_WINDOW_SECS, TIME_PENALTY, TIME_PENALTY_EVERY_SECS,
    },
    event::{Deferred, GameEvent},
    shuffle::shuffle,
};

/// Everything that describes one dealt board. Replaced wholesale when a new
/// board is dealt, never patched back to a fresh state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    cards: Vec<Card>,
    revealed: Vec<usize>,
    matched_pairs: usize,
    moves: u32,
    score: u32,
    elapsed_seconds: u32,
    started: bool,
    difficulty_index: usize,
    generation: u64,
}

impl GameState {
    /// Deal a shuffled board for the given level.
    fn deal<R: rand::Rng + ?Sized>(difficulty_index: usize, generation: u64, rng: &mut R) -> Self {
        let level = DIFFICULTY_LEVELS[difficulty_index];
        let mut symbols: Vec<_> = symbols_for(level.pair_count()).collect();
        symbols.extend_from_within(..);
        shuffle(&mut symbols, rng);
        let cards = symbols
            .into_iter()
            .enumerate()
            .map(|(position, symbol)| Card::new(symbol, position))
            .collect();
        Self {
            cards,
            revealed: Vec::with_capacity(2),
            matched_pairs: 0,
            moves: 0,
            score: 0,
            elapsed_seconds: 0,
            started: false,
            difficulty_index,
            generation,
        }
    }

    /// Cards in board order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    /// Positions of the cards currently face up and not yet matched.
    pub fn revealed_unmatched(&self) -> &[usize] {
        &self.revealed
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Elapsed time as `mm:ss`.
    pub fn time(&self) -> String {
        format_clock(self.elapsed_seconds)
    }

    /// Whether the first card of this board has been revealed.
    pub fn started(&self) -> bool {
        self.started
    }

    pub fn difficulty_index(&self) -> usize {
        self.difficulty_index
    }

    pub fn difficulty(&self) -> DifficultyLevel {
        DIFFICULTY_LEVELS[self.difficulty_index]
    }

    /// Identifier of this board; bumped every time a board is dealt.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn all_matched(&self) -> bool {
        self.matched_pairs == self.difficulty().pair_count()
    }
}

/// Completion bonus for finishing a board in `moves` moves, par being the
/// number of pairs.
pub fn completion_bonus(moves: u32, pair_count: usize) -> u32 {
    let moves = moves as usize;
    if moves == pair_count {
        PERFECT_BONUS
    } else if moves * 2 <= pair_count * 3 {
        GOOD_BONUS
    } else if moves <= pair_count * 2 {
        FAIR_BONUS
    } else {
        0
    }
}

/// Rules of the memory game.
///
/// The engine is synchronous and never sleeps. Presenter notifications queue
/// up in an event outbox ([`GameEngine::drain_events`]); delayed callbacks queue
/// up as [`Deferred`] actions ([`GameEngine::take_deferred`]) which a driver
/// hands back through [`GameEngine::apply_deferred`] once their delay passed.
/// While [`GameEngine::timer_active`] is true the driver calls
/// [`GameEngine::tick`] once per second.
pub struct GameEngine {
    state: GameState,
    rng: SmallRng,
    next_generation: u64,
    dark_mode: bool,
    timer_active: bool,
    summary: Option<GameSummary>,
    events: Vec<GameEvent>,
    deferred: Vec<Deferred>,
}

impl GameEngine {
    /// Create an engine on the default level and deal the first board.
    pub fn new(rng: SmallRng) -> Self {
        Self::with_difficulty(rng, DEFAULT_DIFFICULTY)
    }

    /// Create an engine with a reproducible deal sequence.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    /// Create an engine and deal the first board on `difficulty_index`.
    pub fn with_difficulty(mut rng: SmallRng, difficulty_index: usize) -> Self {
        let state = GameState::deal(difficulty_index % NUM_DIFFICULTIES, 1, &mut rng);
        let mut engine = Self {
            state,
            rng,
            next_generation: 1,
            dark_mode: true,
            timer_active: false,
            summary: None,
            events: Vec::new(),
            deferred: Vec::new(),
        };
        engine.announce_board();
        engine
    }

    /// Deal a fresh board on `difficulty_index` (taken modulo the number of
    /// levels) and stop the clock.
    pub fn initialize(&mut self, difficulty_index: usize) {
        self.next_generation += 1;
        self.state = GameState::deal(
            difficulty_index % NUM_DIFFICULTIES,
            self.next_generation,
            &mut self.rng,
        );
        self.timer_active = false;
        self.summary = None;
        self.announce_board();
    }

    /// Deal again on the current level.
    pub fn reset(&mut self) {
        self.initialize(self.state.difficulty_index);
    }

    /// Start over after a win.
    pub fn play_again(&mut self) {
        self.reset();
    }

    /// Move to the next level, wrapping around, and deal.
    pub fn change_difficulty(&mut self) {
        self.initialize((self.state.difficulty_index + 1) % NUM_DIFFICULTIES);
    }

    /// Flip the presentation theme. Has no effect on the game.
    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
        self.events.push(GameEvent::ThemeChanged {
            dark_mode: self.dark_mode,
        });
    }

    /// Turn the card at `position` face up.
    pub fn reveal_card(&mut self, position: usize) -> RevealOutcome {
        let Some(card) = self.state.card(position).copied() else {
            return self.ignore(position, IgnoreReason::NoSuchCard);
        };
        if self.state.revealed.len() >= 2 {
            return self.ignore(position, IgnoreReason::PairPending);
        }
        if !card.is_hidden() || self.state.revealed.contains(&position) {
            return self.ignore(position, IgnoreReason::AlreadyFaceUp);
        }

        if !self.state.started {
            self.state.started = true;
            self.timer_active = true;
            debug!("clock started for generation {}", self.state.generation);
        }

        self.state.cards[position].set_state(CardState::Revealed);
        self.state.revealed.push(position);
        self.events.push(GameEvent::CardRevealed {
            position,
            symbol: card.symbol(),
        });

        if self.state.revealed.len() < 2 {
            return RevealOutcome::Revealed;
        }
        self.state.moves += 1;
        self.push_counters();
        self.resolve_pair()
    }

    fn ignore(&self, position: usize, reason: IgnoreReason) -> RevealOutcome {
        debug!("ignoring reveal of {}: {}", position, reason);
        RevealOutcome::Ignored(reason)
    }

    fn resolve_pair(&mut self) -> RevealOutcome {
        let positions = [self.state.revealed[0], self.state.revealed[1]];
        let [a, b] = positions;
        if self.state.cards[a].symbol() != self.state.cards[b].symbol() {
            self.deferred.push(Deferred::RevertPair {
                generation: self.state.generation,
                positions,
            });
            return RevealOutcome::Mismatched;
        }

        self.state.cards[a].set_state(CardState::Matched);
        self.state.cards[b].set_state(CardState::Matched);
        self.state.matched_pairs += 1;
        self.state.score += MATCH_POINTS;
        if self.state.elapsed_seconds < QUICK_MATCH_WINDOW_SECS {
            self.state.score += QUICK_MATCH_BONUS;
        }
        self.state.revealed.clear();
        self.events.push(GameEvent::CardsMatched { positions });
        self.push_counters();

        if self.state.all_matched() {
            self.end_game();
            RevealOutcome::Won
        } else {
            RevealOutcome::Matched
        }
    }

    fn end_game(&mut self) {
        self.timer_active = false;
        let pairs = self.state.difficulty().pair_count();
        let bonus = completion_bonus(self.state.moves, pairs);
        self.state.score += bonus;
        self.push_counters();

        let summary = GameSummary {
            difficulty: self.state.difficulty().name(),
            elapsed_seconds: self.state.elapsed_seconds,
            time: self.state.time(),
            moves: self.state.moves,
            score: self.state.score,
            bonus,
        };
        info!(
            "board won in {} with {} moves, score {} (bonus {})",
            summary.time, summary.moves, summary.score, bonus
        );
        self.deferred.push(Deferred::AnnounceWin {
            generation: self.state.generation,
            summary: summary.clone(),
        });
        self.summary = Some(summary);
    }

    /// Advance the game clock by one second.
    ///
    /// Every tenth second costs [`TIME_PENALTY`] points, but only while no
    /// card is waiting face up.
    pub fn tick(&mut self) {
        if !self.timer_active {
            return;
        }
        self.state.elapsed_seconds = self.state.elapsed_seconds.saturating_add(1);
        let secs = self.state.elapsed_seconds;
        if secs % TIME_PENALTY_EVERY_SECS == 0 && self.state.revealed.is_empty() {
            self.state.score = self.state.score.saturating_sub(TIME_PENALTY);
        }
        trace!("tick {} score {}", secs, self.state.score);
        self.push_counters();
    }

    /// Turn a mismatched pair back face down. Returns `false` when the
    /// callback belongs to a replaced board or the pair is no longer pending.
    pub fn revert_pair(&mut self, generation: u64, positions: [usize; 2]) -> bool {
        if generation != self.state.generation {
            debug!(
                "discarding stale revert for generation {} (current {})",
                generation, self.state.generation
            );
            return false;
        }
        if self.state.revealed.as_slice() != positions.as_slice() {
            debug!("discarding revert of {:?}: pair no longer pending", positions);
            return false;
        }
        for position in positions {
            self.state.cards[position].set_state(CardState::Hidden);
        }
        self.state.revealed.clear();
        self.events.push(GameEvent::CardsReverted { positions });
        true
    }

    /// Publish the win announcement unless the board was replaced meanwhile.
    pub fn announce_win(&mut self, generation: u64, summary: GameSummary) -> bool {
        if generation != self.state.generation {
            debug!(
                "discarding stale win announcement for generation {} (current {})",
                generation, self.state.generation
            );
            return false;
        }
        self.events.push(GameEvent::GameWon {
            time: summary.time,
            moves: summary.moves,
            score: summary.score,
        });
        true
    }

    /// Hand back a deferred action whose delay has elapsed.
    pub fn apply_deferred(&mut self, action: Deferred) -> bool {
        match action {
            Deferred::RevertPair {
                generation,
                positions,
            } => self.revert_pair(generation, positions),
            Deferred::AnnounceWin {
                generation,
                summary,
            } => self.announce_win(generation, summary),
        }
    }

    /// Take all presenter notifications queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        core::mem::take(&mut self.events)
    }

    /// Take all delayed callbacks queued since the last call.
    pub fn take_deferred(&mut self) -> Vec<Deferred> {
        core::mem::take(&mut self.deferred)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Presenter-side view of the whole board.
    pub fn board_view(&self) -> Vec<CardView> {
        self.state.cards.iter().map(Card::view).collect()
    }

    pub fn difficulty(&self) -> DifficultyLevel {
        self.state.difficulty()
    }

    pub fn generation(&self) -> u64 {
        self.state.generation
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Whether the once-per-second clock should be running.
    pub fn timer_active(&self) -> bool {
        self.timer_active
    }

    /// Final figures, available once the board is won.
    pub fn summary(&self) -> Option<&GameSummary> {
        self.summary.as_ref()
    }

    pub fn status(&self) -> GameStatus {
        if self.state.all_matched() {
            GameStatus::Won
        } else if self.state.started {
            GameStatus::InProgress
        } else {
            GameStatus::NotStarted
        }
    }

    fn announce_board(&mut self) {
        let level = self.state.difficulty();
        info!(
            "dealt {} board: {} pairs in {} columns (generation {})",
            level.name(),
            level.pair_count(),
            level.columns(),
            self.state.generation
        );
        self.events.push(GameEvent::BoardReady {
            difficulty: level.name(),
            columns: level.columns(),
            cards: self.board_view(),
        });
        self.push_counters();
    }

    fn push_counters(&mut self) {
        self.events.push(GameEvent::CountersChanged {
            moves: self.state.moves,
            score: self.state.score,
            time: self.state.time(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bonus_thresholds() {
        assert_eq!(completion_bonus(6, 6), PERFECT_BONUS);
        assert_eq!(completion_bonus(9, 6), GOOD_BONUS);
        assert_eq!(completion_bonus(10, 6), FAIR_BONUS);
        assert_eq!(completion_bonus(12, 6), FAIR_BONUS);
        assert_eq!(completion_bonus(13, 6), 0);
        assert_eq!(completion_bonus(15, 6), 0);
        // 1.5 × 5 pairs = 7.5 moves
        assert_eq!(completion_bonus(7, 5), GOOD_BONUS);
        assert_eq!(completion_bonus(8, 5), FAIR_BONUS);
    }

    #[test]
    fn generations_increase_per_deal() {
        let mut engine = GameEngine::from_seed(3);
        let first = engine.generation();
        engine.reset();
        engine.change_difficulty();
        assert_eq!(engine.generation(), first + 2);
    }
}
