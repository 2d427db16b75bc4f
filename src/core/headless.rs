//! Runs a [`GameEngine`] against a virtual millisecond clock.
//!
//! Useful for simulations and for tests that need the mismatch delay, the
//! win delay and the game clock without waiting on real time.

use alloc::vec::Vec;

use super::{
    common::RevealOutcome,
    config::Timings,
    event::{Deferred, GameEvent},
    game::GameEngine,
};

fn millis(d: core::time::Duration) -> u64 {
    d.as_millis() as u64
}

pub struct HeadlessGame {
    engine: GameEngine,
    timings: Timings,
    now_ms: u64,
    /// Next tick time and the generation whose clock it belongs to.
    next_tick: Option<(u64, u64)>,
    /// Scheduled callbacks with their due time, in scheduling order.
    pending: Vec<(u64, Deferred)>,
}

impl HeadlessGame {
    pub fn new(engine: GameEngine, timings: Timings) -> Self {
        let mut game = Self {
            engine,
            timings,
            now_ms: 0,
            next_tick: None,
            pending: Vec::new(),
        };
        game.sync();
        game
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn into_engine(self) -> GameEngine {
        self.engine
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of callbacks scheduled and not yet fired.
    pub fn pending_callbacks(&self) -> usize {
        self.pending.len()
    }

    pub fn reveal(&mut self, position: usize) -> RevealOutcome {
        let outcome = self.engine.reveal_card(position);
        self.sync();
        outcome
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.sync();
    }

    pub fn play_again(&mut self) {
        self.engine.play_again();
        self.sync();
    }

    pub fn change_difficulty(&mut self) {
        self.engine.change_difficulty();
        self.sync();
    }

    pub fn toggle_theme(&mut self) {
        self.engine.toggle_theme();
        self.sync();
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.engine.drain_events()
    }

    /// Move the clock forward by `ms`, firing every tick and callback that
    /// falls due on the way. A tick and a callback due at the same instant
    /// fire tick first.
    pub fn advance(&mut self, ms: u64) {
        let target = self.now_ms.saturating_add(ms);
        loop {
            let tick_due = self.next_tick.map(|(at, _)| at).filter(|at| *at <= target);
            let callback_due = self
                .pending
                .iter()
                .enumerate()
                .filter(|(_, (at, _))| *at <= target)
                .min_by_key(|(_, (at, _))| *at)
                .map(|(idx, (at, _))| (idx, *at));

            match (tick_due, callback_due) {
                (Some(tick_at), Some((_, cb_at))) if tick_at <= cb_at => self.fire_tick(tick_at),
                (Some(tick_at), None) => self.fire_tick(tick_at),
                (_, Some((idx, cb_at))) => {
                    self.now_ms = cb_at;
                    let (_, action) = self.pending.remove(idx);
                    self.engine.apply_deferred(action);
                    self.sync();
                }
                (None, None) => break,
            }
        }
        self.now_ms = target;
    }

    /// Advance until no callback is pending. The game clock keeps ticking
    /// meanwhile.
    pub fn settle(&mut self) {
        while let Some(due) = self.pending.iter().map(|(at, _)| *at).min() {
            self.advance(due.saturating_sub(self.now_ms));
        }
    }

    fn tick_ms(&self) -> u64 {
        millis(self.timings.tick_interval).max(1)
    }

    fn fire_tick(&mut self, at: u64) {
        self.now_ms = at;
        self.engine.tick();
        if let Some((_, generation)) = self.next_tick {
            self.next_tick = Some((at + self.tick_ms(), generation));
        }
        self.sync();
    }

    /// Pick up newly scheduled callbacks and start or stop the clock to
    /// match the engine.
    fn sync(&mut self) {
        for action in self.engine.take_deferred() {
            let due = self.now_ms + millis(action.delay(&self.timings));
            self.pending.push((due, action));
        }
        let generation = self.engine.generation();
        self.next_tick = match self.next_tick {
            _ if !self.engine.timer_active() => None,
            Some((at, g)) if g == generation => Some((at, g)),
            _ => Some((self.now_ms + self.tick_ms(), generation)),
        };
    }
}
