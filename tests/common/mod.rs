#![allow(dead_code)]

use std::collections::BTreeMap;

use memorama::{GameEngine, GameEvent, SymbolId};

/// Positions of both cards of every symbol, ordered by symbol.
pub fn pairs(engine: &GameEngine) -> Vec<[usize; 2]> {
    let mut by_symbol: BTreeMap<SymbolId, Vec<usize>> = BTreeMap::new();
    for card in engine.state().cards() {
        by_symbol.entry(card.symbol()).or_default().push(card.position());
    }
    by_symbol
        .into_values()
        .map(|positions| [positions[0], positions[1]])
        .collect()
}

/// Two positions whose symbols differ.
pub fn mismatch(engine: &GameEngine) -> [usize; 2] {
    let pairs = pairs(engine);
    [pairs[0][0], pairs[1][0]]
}

/// Events emitted after the most recent `BoardReady`.
pub fn since_last_board(events: &[GameEvent]) -> &[GameEvent] {
    let start = events
        .iter()
        .rposition(|e| matches!(e, GameEvent::BoardReady { .. }))
        .map(|i| i + 1)
        .unwrap_or(0);
    &events[start..]
}
