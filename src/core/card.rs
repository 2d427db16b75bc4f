//! Cards, their face symbols and the face-up/face-down state machine.

use core::fmt;

use super::config::SYMBOLS;

/// Identifier of a card face, an index into the symbol catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(transparent))]
pub struct SymbolId(u8);

impl SymbolId {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Catalog name of the symbol, `"?"` for ids outside the catalog.
    pub fn name(&self) -> &'static str {
        SYMBOLS.get(self.index()).map(|(name, _)| *name).unwrap_or("?")
    }

    /// Single character used by text presenters.
    pub fn glyph(&self) -> char {
        SYMBOLS.get(self.index()).map(|(_, g)| *g).unwrap_or('?')
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Face state of a card.
///
/// `Hidden -> Revealed -> Matched` or back to `Hidden` after a mismatch.
/// `Matched` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "snake_case"))]
pub enum CardState {
    Hidden,
    Revealed,
    Matched,
}

/// A dealt card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    symbol: SymbolId,
    position: usize,
    state: CardState,
}

impl Card {
    pub fn new(symbol: SymbolId, position: usize) -> Self {
        Self {
            symbol,
            position,
            state: CardState::Hidden,
        }
    }

    pub fn symbol(&self) -> SymbolId {
        self.symbol
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn is_hidden(&self) -> bool {
        self.state == CardState::Hidden
    }

    pub(crate) fn set_state(&mut self, state: CardState) {
        self.state = state;
    }

    /// What a presenter is allowed to see of this card.
    pub fn view(&self) -> CardView {
        CardView {
            position: self.position,
            state: self.state,
            symbol: match self.state {
                CardState::Hidden => None,
                CardState::Revealed | CardState::Matched => Some(self.symbol),
            },
        }
    }
}

/// Presenter-side view of a card. The symbol is only present while face up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct CardView {
    pub position: usize,
    pub state: CardState,
    pub symbol: Option<SymbolId>,
}

impl CardView {
    pub fn hidden(position: usize) -> Self {
        Self {
            position,
            state: CardState::Hidden,
            symbol: None,
        }
    }
}
