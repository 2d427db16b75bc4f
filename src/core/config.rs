use core::time::Duration;

use super::card::SymbolId;

/// A board size: how many pairs are dealt and how many columns they are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyLevel {
    name: &'static str,
    pair_count: usize,
    columns: usize,
}

impl DifficultyLevel {
    /// Create a new difficulty level.
    pub const fn new(name: &'static str, pair_count: usize, columns: usize) -> Self {
        Self {
            name,
            pair_count,
            columns,
        }
    }

    /// Display name of the level.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of distinct symbols on the board.
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    /// Number of grid columns the presenter should use.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of cards dealt for this level.
    pub fn card_count(&self) -> usize {
        self.pair_count * 2
    }
}

pub const NUM_SYMBOLS: usize = 10;
pub const SYMBOLS: [(&str, char); NUM_SYMBOLS] = [
    ("microscope", 'M'),
    ("test-tubes", 'T'),
    ("dna", 'D'),
    ("cell", 'C'),
    ("telescope", 'S'),
    ("planet", 'P'),
    ("atom", 'A'),
    ("formula", 'F'),
    ("virus", 'V'),
    ("laboratory", 'L'),
];

pub const NUM_DIFFICULTIES: usize = 3;
pub const DIFFICULTY_LEVELS: [DifficultyLevel; NUM_DIFFICULTIES] = [
    DifficultyLevel::new("Fácil", 6, 3),
    DifficultyLevel::new("Medio", 8, 4),
    DifficultyLevel::new("Difícil", 10, 5),
];

/// Level selected when a game is first created.
pub const DEFAULT_DIFFICULTY: usize = 1;

pub const MATCH_POINTS: u32 = 100;
pub const QUICK_MATCH_BONUS: u32 = 50;
/// Matches made strictly before this many elapsed seconds earn [`QUICK_MATCH_BONUS`].
pub const QUICK_MATCH_WINDOW_SECS: u32 = 60;
pub const TIME_PENALTY: u32 = 10;
pub const TIME_PENALTY_EVERY_SECS: u32 = 10;

pub const PERFECT_BONUS: u32 = 500;
pub const GOOD_BONUS: u32 = 300;
pub const FAIR_BONUS: u32 = 100;

/// Look up a difficulty level by case-insensitive name or by index.
pub fn difficulty_index(name: &str) -> Option<usize> {
    let name = name.trim();
    if let Ok(idx) = name.parse::<usize>() {
        return (idx < NUM_DIFFICULTIES).then_some(idx);
    }
    DIFFICULTY_LEVELS
        .iter()
        .position(|level| level.name().to_lowercase() == name.to_lowercase())
}

/// Symbols dealt on a board with `pair_count` pairs: the first `pair_count`
/// entries of the catalog.
pub fn symbols_for(pair_count: usize) -> impl Iterator<Item = SymbolId> {
    (0..pair_count.min(NUM_SYMBOLS)).map(|i| SymbolId::new(i as u8))
}

/// Delays used by the drivers that run the engine against a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Period of the game clock.
    pub tick_interval: Duration,
    /// How long a mismatched pair stays face up.
    pub mismatch_delay: Duration,
    /// Pause between the last match and the win announcement.
    pub win_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            mismatch_delay: Duration::from_millis(1000),
            win_delay: Duration::from_millis(1000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_largest_board() {
        let largest = DIFFICULTY_LEVELS.iter().map(|l| l.pair_count()).max();
        assert!(largest.unwrap_or(0) <= NUM_SYMBOLS);
    }

    #[test]
    fn lookup_by_name_or_index() {
        assert_eq!(difficulty_index("fácil"), Some(0));
        assert_eq!(difficulty_index("MEDIO"), Some(1));
        assert_eq!(difficulty_index("2"), Some(2));
        assert_eq!(difficulty_index("3"), None);
        assert_eq!(difficulty_index("imposible"), None);
    }
}
