use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use rand::{rngs::SmallRng, Rng};

use crate::core::{card::SymbolId, event::GameEvent};

use super::{BoardTracker, Player};

/// Computer player with an imperfect memory.
///
/// Every revealed symbol is remembered. On each pick the player consults its
/// memory with probability `recall`; otherwise it turns a card it has not seen
/// yet, or any hidden card once everything has been seen.
pub struct AiPlayer {
    recall: f64,
    board: BoardTracker,
    seen: BTreeMap<usize, SymbolId>,
}

impl AiPlayer {
    /// `recall` is clamped to `[0, 1]`.
    pub fn new(recall: f64) -> Self {
        let recall = if recall.is_nan() {
            0.0
        } else {
            recall.clamp(0.0, 1.0)
        };
        Self {
            recall,
            board: BoardTracker::new(),
            seen: BTreeMap::new(),
        }
    }

    /// Player that never forgets.
    pub fn perfect() -> Self {
        Self::new(1.0)
    }

    pub fn board(&self) -> &BoardTracker {
        &self.board
    }

    fn known_partner(&self, open: usize, hidden: &[usize]) -> Option<usize> {
        let symbol = self.seen.get(&open)?;
        hidden
            .iter()
            .copied()
            .find(|p| *p != open && self.seen.get(p) == Some(symbol))
    }

    fn known_pair(&self, hidden: &[usize]) -> Option<usize> {
        hidden.iter().copied().find(|&p| {
            let symbol = self.seen.get(&p);
            symbol.is_some() && hidden.iter().any(|&q| q != p && self.seen.get(&q) == symbol)
        })
    }
}

impl Player for AiPlayer {
    fn observe(&mut self, event: &GameEvent) {
        self.board.apply(event);
        match event {
            GameEvent::BoardReady { .. } => self.seen.clear(),
            GameEvent::CardRevealed { position, symbol } => {
                self.seen.insert(*position, *symbol);
            }
            GameEvent::CardsMatched { positions } => {
                for p in positions {
                    self.seen.remove(p);
                }
            }
            _ => {}
        }
    }

    fn select_card(&mut self, rng: &mut SmallRng) -> Option<usize> {
        let face_up = self.board.face_up();
        let hidden = self.board.hidden();
        if face_up.len() >= 2 || hidden.is_empty() {
            return None;
        }

        if rng.random_bool(self.recall) {
            let known = match face_up.first() {
                Some(&open) => self.known_partner(open, &hidden),
                None => self.known_pair(&hidden),
            };
            if known.is_some() {
                return known;
            }
        }

        let unseen: Vec<usize> = hidden
            .iter()
            .copied()
            .filter(|p| !self.seen.contains_key(p))
            .collect();
        let pool = if unseen.is_empty() { &hidden } else { &unseen };
        Some(pool[rng.random_range(0..pool.len())])
    }
}
