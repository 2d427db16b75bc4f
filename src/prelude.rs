//! Commonly used types and utilities for ease of import.

pub use crate::{
    AiPlayer, CardState, GameEngine, GameEvent, GameStatus, HeadlessGame, Player, RevealOutcome,
    Timings,
};

#[cfg(feature = "std")]
pub use crate::{ConsolePresenter, GameSession, Presenter, SessionHandle};
