//! Core memory game engine (no_std compatible)
//!
//! This module contains the pure game rules and a virtual-clock driver. It
//! depends only on `alloc`, `rand` and `log`, so it can be embedded in any
//! front end, including WebAssembly.

pub mod card;
pub mod common;
pub mod config;
pub mod event;
pub mod game;
pub mod headless;
pub mod shuffle;

// Re-export commonly used types
pub use card::{Card, CardState, CardView, SymbolId};
pub use common::{format_clock, GameStatus, GameSummary, IgnoreReason, RevealOutcome};
pub use config::*;
pub use event::{Deferred, GameEvent};
pub use game::{completion_bonus, GameEngine, GameState};
pub use headless::HeadlessGame;
pub use shuffle::shuffle;
