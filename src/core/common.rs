//! Common types for the game engine: reveal outcomes, status and summaries.

use alloc::string::String;
use core::fmt;

/// Why a reveal request left the board unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Position is not on the current board.
    NoSuchCard,
    /// Two cards are already face up and waiting to be resolved.
    PairPending,
    /// Card is already revealed or matched.
    AlreadyFaceUp,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreReason::NoSuchCard => write!(f, "No card at this position"),
            IgnoreReason::PairPending => write!(f, "Two cards are already face up"),
            IgnoreReason::AlreadyFaceUp => write!(f, "Card is already face up"),
        }
    }
}

/// Result of a reveal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// First card of a pair turned face up.
    Revealed,
    /// Second card completed a pair.
    Matched,
    /// Second card did not match; both flip back after the mismatch delay.
    Mismatched,
    /// Second card completed the last pair.
    Won,
}

/// Current status of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "snake_case"))]
pub enum GameStatus {
    NotStarted,
    InProgress,
    Won,
}

/// Final figures of a finished board.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct GameSummary {
    pub difficulty: &'static str,
    pub elapsed_seconds: u32,
    pub time: String,
    pub moves: u32,
    pub score: u32,
    pub bonus: u32,
}

/// Format whole seconds as `mm:ss`. Minutes keep growing past 99.
pub fn format_clock(seconds: u32) -> String {
    alloc::format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(9), "00:09");
        assert_eq!(format_clock(75), "01:15");
        assert_eq!(format_clock(6000), "100:00");
    }
}
