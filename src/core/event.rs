//! Notifications the engine emits for presenters, and the delayed callbacks
//! it asks its driver to schedule.

use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use super::{
    card::{CardView, SymbolId},
    common::GameSummary,
    config::Timings,
};

/// State change a presenter should render.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
#[cfg_attr(feature = "std", serde(tag = "type", rename_all = "snake_case"))]
pub enum GameEvent {
    /// A new board was dealt; every card is face down.
    BoardReady {
        difficulty: &'static str,
        columns: usize,
        cards: Vec<CardView>,
    },
    CardRevealed {
        position: usize,
        symbol: SymbolId,
    },
    CardsMatched {
        positions: [usize; 2],
    },
    CardsReverted {
        positions: [usize; 2],
    },
    CountersChanged {
        moves: u32,
        score: u32,
        time: String,
    },
    GameWon {
        time: String,
        moves: u32,
        score: u32,
    },
    ThemeChanged {
        dark_mode: bool,
    },
}

/// One-shot callback the engine wants fired after a delay.
///
/// Each action remembers the board generation it was scheduled under; the
/// engine discards it if that board has since been replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    /// Flip a mismatched pair back face down.
    RevertPair { generation: u64, positions: [usize; 2] },
    /// Show the win dialog.
    AnnounceWin { generation: u64, summary: GameSummary },
}

impl Deferred {
    pub fn generation(&self) -> u64 {
        match self {
            Deferred::RevertPair { generation, .. } | Deferred::AnnounceWin { generation, .. } => {
                *generation
            }
        }
    }

    /// How long the driver waits before handing the action back.
    pub fn delay(&self, timings: &Timings) -> Duration {
        match self {
            Deferred::RevertPair { .. } => timings.mismatch_delay,
            Deferred::AnnounceWin { .. } => timings.win_delay,
        }
    }
}
