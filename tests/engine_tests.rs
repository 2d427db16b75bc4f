mod common;

use common::{mismatch, pairs, since_last_board};
use memorama::{
    CardState, Deferred, GameEngine, GameEvent, GameStatus, IgnoreReason, RevealOutcome,
    DIFFICULTY_LEVELS, NUM_DIFFICULTIES,
};
use rand::{rngs::SmallRng, SeedableRng};
use std::collections::BTreeMap;

fn easy(seed: u64) -> GameEngine {
    GameEngine::with_difficulty(SmallRng::seed_from_u64(seed), 0)
}

fn revert_pending(engine: &mut GameEngine) {
    for action in engine.take_deferred() {
        assert!(engine.apply_deferred(action));
    }
}

#[test]
fn every_level_deals_each_symbol_twice() {
    for idx in 0..NUM_DIFFICULTIES {
        let engine = GameEngine::with_difficulty(SmallRng::seed_from_u64(idx as u64), idx);
        let level = DIFFICULTY_LEVELS[idx];
        let cards = engine.state().cards();
        assert_eq!(cards.len(), 2 * level.pair_count());

        let mut counts = BTreeMap::new();
        for (i, card) in cards.iter().enumerate() {
            assert_eq!(card.position(), i);
            assert_eq!(card.state(), CardState::Hidden);
            assert!(card.symbol().index() < level.pair_count());
            *counts.entry(card.symbol()).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), level.pair_count());
        assert!(counts.values().all(|&n| n == 2));
    }
}

#[test]
fn new_engine_announces_board_and_counters() {
    let mut engine = GameEngine::from_seed(1);
    let events = engine.drain_events();
    match &events[0] {
        GameEvent::BoardReady {
            difficulty,
            columns,
            cards,
        } => {
            assert_eq!(*difficulty, "Medio");
            assert_eq!(*columns, 4);
            assert_eq!(cards.len(), 16);
            assert!(cards.iter().all(|c| c.symbol.is_none()));
        }
        other => panic!("expected BoardReady, got {:?}", other),
    }
    assert_eq!(
        events[1],
        GameEvent::CountersChanged {
            moves: 0,
            score: 0,
            time: "00:00".to_string()
        }
    );
    assert_eq!(engine.status(), GameStatus::NotStarted);
    assert!(!engine.timer_active());
    assert!(engine.dark_mode());
}

#[test]
fn quick_first_match_on_easy_scores_150() {
    let mut engine = easy(7);
    let [a, b] = pairs(&engine)[0];
    assert_eq!(engine.reveal_card(a), RevealOutcome::Revealed);
    assert!(engine.timer_active());
    assert_eq!(engine.reveal_card(b), RevealOutcome::Matched);

    let state = engine.state();
    assert_eq!(state.score(), 150);
    assert_eq!(state.moves(), 1);
    assert_eq!(state.matched_pairs(), 1);
    assert!(state.revealed_unmatched().is_empty());
    assert_eq!(state.card(a).unwrap().state(), CardState::Matched);
    assert_eq!(state.card(b).unwrap().state(), CardState::Matched);
    assert_eq!(engine.status(), GameStatus::InProgress);
    assert!(engine.take_deferred().is_empty());
}

#[test]
fn third_card_is_ignored_while_pair_pending() {
    let mut engine = easy(11);
    let [a, b] = mismatch(&engine);
    engine.reveal_card(a);
    assert_eq!(engine.reveal_card(b), RevealOutcome::Mismatched);

    let third = (0..12).find(|p| *p != a && *p != b).unwrap();
    let before = engine.state().clone();
    assert_eq!(
        engine.reveal_card(third),
        RevealOutcome::Ignored(IgnoreReason::PairPending)
    );
    assert_eq!(engine.state(), &before);
}

#[test]
fn same_card_twice_is_ignored() {
    let mut engine = easy(2);
    engine.reveal_card(3);
    let before = engine.state().clone();
    assert_eq!(
        engine.reveal_card(3),
        RevealOutcome::Ignored(IgnoreReason::AlreadyFaceUp)
    );
    assert_eq!(engine.state(), &before);
    assert_eq!(engine.state().moves(), 0);
}

#[test]
fn matched_cards_stay_out_of_play() {
    let mut engine = easy(4);
    let [a, b] = pairs(&engine)[2];
    engine.reveal_card(a);
    engine.reveal_card(b);
    assert_eq!(
        engine.reveal_card(a),
        RevealOutcome::Ignored(IgnoreReason::AlreadyFaceUp)
    );
    assert!(engine.state().revealed_unmatched().is_empty());
}

#[test]
fn position_off_the_board_is_ignored() {
    let mut engine = easy(5);
    engine.drain_events();
    let before = engine.state().clone();
    assert_eq!(
        engine.reveal_card(999),
        RevealOutcome::Ignored(IgnoreReason::NoSuchCard)
    );
    assert_eq!(engine.state(), &before);
    assert!(!engine.timer_active());
    assert!(engine.drain_events().is_empty());
}

#[test]
fn mismatch_reverts_through_deferred_callback() {
    let mut engine = easy(8);
    let [a, b] = mismatch(&engine);
    engine.reveal_card(a);
    engine.reveal_card(b);

    let deferred = engine.take_deferred();
    assert_eq!(
        deferred,
        vec![Deferred::RevertPair {
            generation: engine.generation(),
            positions: [a, b]
        }]
    );
    // Both stay face up until the callback fires
    assert_eq!(engine.state().card(a).unwrap().state(), CardState::Revealed);
    assert_eq!(engine.state().revealed_unmatched(), &[a, b]);

    engine.drain_events();
    assert!(engine.apply_deferred(deferred[0].clone()));
    let state = engine.state();
    assert_eq!(state.card(a).unwrap().state(), CardState::Hidden);
    assert_eq!(state.card(b).unwrap().state(), CardState::Hidden);
    assert!(state.revealed_unmatched().is_empty());
    assert_eq!(state.score(), 0);
    assert_eq!(state.moves(), 1);
    assert_eq!(
        engine.drain_events(),
        vec![GameEvent::CardsReverted { positions: [a, b] }]
    );
}

#[test]
fn stale_revert_is_discarded_after_reset() {
    let mut engine = easy(9);
    let [a, b] = mismatch(&engine);
    engine.reveal_card(a);
    engine.reveal_card(b);
    let pending = engine.take_deferred();

    engine.reset();
    let fresh = engine.state().clone();
    assert!(!engine.apply_deferred(pending[0].clone()));
    assert_eq!(engine.state(), &fresh);

    let events = engine.drain_events();
    assert!(!since_last_board(&events)
        .iter()
        .any(|e| matches!(e, GameEvent::CardsReverted { .. })));
}

#[test]
fn callbacks_carry_the_board_generation() {
    let mut engine = easy(11);
    let [a, b] = mismatch(&engine);
    engine.reveal_card(a);
    engine.reveal_card(b);
    let before = engine.take_deferred();
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].generation(), engine.generation());

    engine.change_difficulty();
    let [c, d] = mismatch(&engine);
    engine.reveal_card(c);
    engine.reveal_card(d);
    let after = engine.take_deferred();
    assert_eq!(after[0].generation(), before[0].generation() + 1);
}

#[test]
fn revert_of_other_positions_is_ignored() {
    let mut engine = easy(10);
    let [a, b] = mismatch(&engine);
    engine.reveal_card(a);
    engine.reveal_card(b);
    let generation = engine.generation();
    assert!(!engine.revert_pair(generation, [b, a]));
    assert_eq!(engine.state().revealed_unmatched(), &[a, b]);
}

#[test]
fn clock_runs_only_after_first_reveal() {
    let mut engine = easy(12);
    engine.tick();
    assert_eq!(engine.state().elapsed_seconds(), 0);
    engine.reveal_card(0);
    engine.tick();
    assert_eq!(engine.state().elapsed_seconds(), 1);
    assert_eq!(engine.state().time(), "00:01");
}

#[test]
fn time_penalty_never_drives_score_negative() {
    let mut engine = easy(13);
    let [a, b] = pairs(&engine)[0];
    engine.reveal_card(a);
    engine.reveal_card(b);
    assert_eq!(engine.state().score(), 150);

    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.state().score(), 140);
    for _ in 0..300 {
        engine.tick();
    }
    assert_eq!(engine.state().score(), 0);
    assert_eq!(engine.state().elapsed_seconds(), 310);
}

#[test]
fn penalty_skipped_while_a_card_is_face_up() {
    let mut engine = easy(14);
    let all = pairs(&engine);
    engine.reveal_card(all[0][0]);
    engine.reveal_card(all[0][1]);
    engine.reveal_card(all[1][0]);
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.state().score(), 150);
}

#[test]
fn match_after_a_minute_earns_no_quick_bonus() {
    let mut engine = easy(15);
    let [a, b] = pairs(&engine)[0];
    engine.reveal_card(a);
    for _ in 0..60 {
        engine.tick();
    }
    engine.reveal_card(b);
    assert_eq!(engine.state().score(), 100);
}

#[test]
fn perfect_game_on_easy_earns_500_bonus() {
    let mut engine = easy(16);
    let all = pairs(&engine);
    let mut last = RevealOutcome::Revealed;
    for [a, b] in &all {
        engine.reveal_card(*a);
        last = engine.reveal_card(*b);
    }
    assert_eq!(last, RevealOutcome::Won);
    assert_eq!(engine.status(), GameStatus::Won);
    assert!(!engine.timer_active());

    let summary = engine.summary().cloned().unwrap();
    assert_eq!(summary.moves, 6);
    assert_eq!(summary.bonus, 500);
    assert_eq!(summary.score, 6 * 150 + 500);
    assert_eq!(engine.state().score(), 1400);

    engine.drain_events();
    let deferred = engine.take_deferred();
    assert_eq!(deferred.len(), 1);
    assert!(engine.apply_deferred(deferred[0].clone()));
    assert_eq!(
        engine.drain_events(),
        vec![GameEvent::GameWon {
            time: "00:00".to_string(),
            moves: 6,
            score: 1400
        }]
    );
}

#[test]
fn slow_game_earns_no_bonus() {
    let mut engine = easy(17);
    let all = pairs(&engine);
    let [a, b] = mismatch(&engine);
    // 9 misses + 6 matches = 15 moves = 2.5 × 6 pairs
    for _ in 0..9 {
        engine.reveal_card(a);
        engine.reveal_card(b);
        revert_pending(&mut engine);
    }
    for [x, y] in &all {
        engine.reveal_card(*x);
        engine.reveal_card(*y);
    }
    let summary = engine.summary().cloned().unwrap();
    assert_eq!(summary.moves, 15);
    assert_eq!(summary.bonus, 0);
    assert_eq!(summary.score, 900);
}

#[test]
fn change_difficulty_cycles_levels() {
    let mut engine = GameEngine::from_seed(18);
    assert_eq!(engine.difficulty().name(), "Medio");
    engine.change_difficulty();
    assert_eq!(engine.difficulty().name(), "Difícil");
    assert_eq!(engine.state().cards().len(), 20);
    engine.change_difficulty();
    assert_eq!(engine.difficulty().name(), "Fácil");
    assert_eq!(engine.state().cards().len(), 12);
    engine.change_difficulty();
    assert_eq!(engine.difficulty().name(), "Medio");
}

#[test]
fn initialize_wraps_out_of_range_index() {
    let mut engine = GameEngine::from_seed(19);
    engine.initialize(NUM_DIFFICULTIES + 2);
    assert_eq!(engine.state().difficulty_index(), 2);
}

#[test]
fn reset_replaces_the_whole_state() {
    let mut engine = easy(20);
    let [a, b] = pairs(&engine)[0];
    engine.reveal_card(a);
    engine.reveal_card(b);
    engine.tick();
    engine.reset();
    let state = engine.state();
    assert_eq!(state.score(), 0);
    assert_eq!(state.moves(), 0);
    assert_eq!(state.matched_pairs(), 0);
    assert_eq!(state.elapsed_seconds(), 0);
    assert!(!state.started());
    assert_eq!(state.difficulty_index(), 0);
    assert!(!engine.timer_active());
    assert!(state.cards().iter().all(|c| c.state() == CardState::Hidden));
}

#[test]
fn theme_toggle_leaves_game_alone() {
    let mut engine = easy(21);
    let [a, b] = pairs(&engine)[0];
    engine.reveal_card(a);
    engine.reveal_card(b);
    engine.drain_events();

    engine.toggle_theme();
    assert!(!engine.dark_mode());
    assert_eq!(engine.state().score(), 150);
    assert_eq!(
        engine.drain_events(),
        vec![GameEvent::ThemeChanged { dark_mode: false }]
    );

    engine.reset();
    assert!(!engine.dark_mode());
}

#[test]
fn win_announcement_is_dropped_after_play_again() {
    let mut engine = easy(22);
    for [a, b] in pairs(&engine) {
        engine.reveal_card(a);
        engine.reveal_card(b);
    }
    let pending = engine.take_deferred();
    engine.play_again();
    engine.drain_events();
    assert!(!engine.apply_deferred(pending[0].clone()));
    assert!(engine.drain_events().is_empty());
    assert!(engine.summary().is_none());
}
