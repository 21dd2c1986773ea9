//! Turn flow through the public engine API.
//!
//! Each test drives a full game with scripted dice: rolling, resolution,
//! the yield decision, turn hand-over and the end of the game.

mod common;

use common::{card, deck, ScriptedDice};
use tokyo_rules::core::GameSnapshot;
use tokyo_rules::DieFace::{self, *};
use tokyo_rules::{
    Action, GameBuilder, GameResult, GameState, IllegalAction, OwnedCard, Phase, PlayerId,
    RulesConfig, RulesEngine, RulesError, TokyoRules,
};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);
const P2: PlayerId = PlayerId::new(2);

fn game(seats: usize, faces: &[DieFace]) -> (TokyoRules, GameState, ScriptedDice) {
    let mut dice = ScriptedDice::new(faces);
    let (rules, state) = GameBuilder::new(seats)
        .deck_order(deck(&[]))
        .build(&mut dice)
        .unwrap();
    (rules, state, dice)
}

fn illegal(result: Result<(), RulesError>) -> IllegalAction {
    match result {
        Err(RulesError::Illegal(reason)) => reason,
        other => panic!("expected an illegal action, got {other:?}"),
    }
}

/// Claw x3 plus 1 x3 with Tokyo empty: +1 for the triple, +1 for entering.
#[test]
fn test_first_roll_claims_empty_tokyo() {
    let (rules, mut state, mut dice) = game(2, &[Claw, Claw, Claw, One, One, One]);

    rules
        .apply_action(&mut state, P0, Action::LockIn, &mut dice)
        .unwrap();

    assert_eq!(state.monster(P0).victory_points, 2);
    assert_eq!(state.tokyo.occupant, Some(P0));
    assert!(state.monster(P0).in_tokyo);
    assert_eq!(state.monster(P1).health, 10);
    assert_eq!(state.phase(), Phase::Resolved);
    assert_eq!(rules.decider(&state), None);
}

/// Spending both rerolls resolves the dice without a lock-in.
#[test]
fn test_rerolls_run_out() {
    let (rules, mut state, mut dice) = game(2, &[Heart; 6]);

    rules
        .apply_action(&mut state, P0, Action::Roll, &mut dice)
        .unwrap();
    assert_eq!(state.phase(), Phase::Rolling);
    assert_eq!(state.dice.rerolls_left(), 1);

    rules
        .apply_action(&mut state, P0, Action::Roll, &mut dice)
        .unwrap();
    assert_eq!(state.phase(), Phase::Resolved);
    assert_eq!(state.dice.rerolls_left(), 0);
    assert_eq!(
        illegal(rules.apply_action(&mut state, P0, Action::Roll, &mut dice)),
        IllegalAction::WrongPhase
    );
}

#[test]
fn test_held_dice_keep_their_faces() {
    let (rules, mut state, _) = game(2, &[Claw, Claw, Heart, Heart, Two, Two]);
    let mut dice = ScriptedDice::new(&[]).with_fallback(One);

    for die in [0, 1] {
        rules
            .apply_action(&mut state, P0, Action::ToggleHold { die }, &mut dice)
            .unwrap();
    }
    rules
        .apply_action(&mut state, P0, Action::Roll, &mut dice)
        .unwrap();

    assert_eq!(state.dice.faces(), &[Claw, Claw, One, One, One, One]);
    assert_eq!(state.dice.held(), &[true, true, false, false, false, false]);
}

/// The attacked occupant alone decides; the roller waits.
#[test]
fn test_yield_authority_and_transfer() {
    let (rules, mut state, mut dice) = game(
        2,
        &[
            Claw, Claw, Claw, One, One, One, // seat 0
            Claw, Claw, Heart, Heart, Lightning, Lightning, // seat 1
        ],
    );
    rules.apply_action(&mut state, P0, Action::LockIn, &mut dice).unwrap();
    rules.apply_action(&mut state, P0, Action::EndTurn, &mut dice).unwrap();
    assert_eq!(state.active(), P1);

    rules.apply_action(&mut state, P1, Action::LockIn, &mut dice).unwrap();

    assert_eq!(state.phase(), Phase::AwaitingYieldDecision);
    assert_eq!(state.tokyo.pending_damage, 2);
    assert_eq!(state.tokyo.attacker, Some(P1));
    assert_eq!(rules.decider(&state), Some(P0));
    assert_eq!(rules.snapshot(&state).decider(), Some(P0));
    assert_eq!(state.monster(P1).energy, 2);

    let decision = Action::DecideYield { yield_tokyo: true };
    assert_eq!(
        illegal(rules.apply_action(&mut state, P1, decision, &mut dice)),
        IllegalAction::NotDecider
    );
    assert_eq!(
        illegal(rules.apply_action(&mut state, P1, Action::EndTurn, &mut dice)),
        IllegalAction::PendingDamage
    );

    rules.apply_action(&mut state, P0, decision, &mut dice).unwrap();

    assert_eq!(state.monster(P0).health, 8);
    assert_eq!(state.tokyo.occupant, Some(P1));
    assert!(!state.monster(P0).in_tokyo);
    assert_eq!(state.monster(P1).victory_points, 1);
    assert_eq!(state.phase(), Phase::Resolved);
    assert_eq!(rules.decider(&state), None);
}

#[test]
fn test_staying_pays_start_bonus_next_turn() {
    let (rules, mut state, mut dice) = game(
        2,
        &[
            Claw, Claw, Claw, One, One, One, // seat 0
            Claw, Claw, Heart, Heart, Lightning, Lightning, // seat 1
        ],
    );
    rules.apply_action(&mut state, P0, Action::LockIn, &mut dice).unwrap();
    rules.apply_action(&mut state, P0, Action::EndTurn, &mut dice).unwrap();
    rules.apply_action(&mut state, P1, Action::LockIn, &mut dice).unwrap();
    rules
        .apply_action(&mut state, P0, Action::DecideYield { yield_tokyo: false }, &mut dice)
        .unwrap();

    assert_eq!(state.monster(P0).health, 8);
    assert_eq!(state.tokyo.occupant, Some(P0));

    rules.apply_action(&mut state, P1, Action::EndTurn, &mut dice).unwrap();

    assert_eq!(state.active(), P0);
    assert_eq!(state.monster(P0).victory_points, 4);
    assert_eq!(state.turn.turn_number, 3);
}

#[test]
fn test_attack_from_tokyo_hits_everyone_else() {
    let (rules, mut state, mut dice) = game(3, &[Claw, Claw, Claw, One, One, One]);
    rules.apply_action(&mut state, P0, Action::LockIn, &mut dice).unwrap();
    rules.apply_action(&mut state, P0, Action::EndTurn, &mut dice).unwrap();

    // Fallback threes: the others score and leave Tokyo alone.
    for seat in [P1, P2] {
        rules.apply_action(&mut state, seat, Action::LockIn, &mut dice).unwrap();
        assert_eq!(state.monster(seat).victory_points, 6);
        rules.apply_action(&mut state, seat, Action::EndTurn, &mut dice).unwrap();
    }
    assert_eq!(state.active(), P0);
    assert_eq!(state.monster(P0).victory_points, 4);

    let mut claws = ScriptedDice::new(&[Claw; 6]);
    rules.apply_action(&mut state, P0, Action::Roll, &mut claws).unwrap();
    rules.apply_action(&mut state, P0, Action::LockIn, &mut claws).unwrap();

    assert_eq!(state.phase(), Phase::Resolved);
    assert_eq!(rules.decider(&state), None);
    assert_eq!(state.monster(P1).health, 4);
    assert_eq!(state.monster(P2).health, 4);
    assert_eq!(state.monster(P0).health, 10);
}

#[test]
fn test_end_turn_skips_eliminated_seats() {
    let (rules, mut state, mut dice) = game(3, &[]);
    state.monster_mut(P1).alive = false;
    state.monster_mut(P1).health = 0;

    rules.apply_action(&mut state, P0, Action::LockIn, &mut dice).unwrap();
    rules.apply_action(&mut state, P0, Action::EndTurn, &mut dice).unwrap();

    assert_eq!(state.active(), P2);
    assert_eq!(
        illegal(rules.apply_action(&mut state, P1, Action::Roll, &mut dice)),
        IllegalAction::PlayerEliminated
    );

    rules.apply_action(&mut state, P2, Action::LockIn, &mut dice).unwrap();
    rules.apply_action(&mut state, P2, Action::EndTurn, &mut dice).unwrap();
    assert_eq!(state.active(), P0);
}

/// Rejected actions change nothing and draw no dice.
#[test]
fn test_illegal_actions_leave_state_untouched() {
    let (rules, mut state, _) = game(2, &[]);
    let mut dice = ScriptedDice::new(&[Claw; 12]);
    let before = GameSnapshot::capture(&state);

    let attempts = [
        (P1, Action::Roll, IllegalAction::NotYourTurn),
        (P0, Action::EndTurn, IllegalAction::WrongPhase),
        (P0, Action::ToggleHold { die: 9 }, IllegalAction::DieOutOfRange),
        (P0, Action::BuyCard { slot: 0 }, IllegalAction::WrongPhase),
        (P0, Action::RapidHeal, IllegalAction::MissingAbility),
        (P0, Action::DecideYield { yield_tokyo: true }, IllegalAction::WrongPhase),
        (P0, Action::SweepMarket, IllegalAction::CannotAfford),
        (P1, Action::BuyCard { slot: 0 }, IllegalAction::NotYourTurn),
        (P1, Action::PsychicProbe { die: 0 }, IllegalAction::MissingAbility),
        (PlayerId::new(5), Action::LockIn, IllegalAction::NotYourTurn),
    ];

    for (seat, action, reason) in attempts {
        let result = rules.apply_action(&mut state, seat, action, &mut dice);
        assert_eq!(illegal(result), reason, "{action:?} by {seat}");
    }

    assert_eq!(GameSnapshot::capture(&state), before);
    assert!(state.history.is_empty());
    assert_eq!(dice.remaining(), 12);
}

#[test]
fn test_frenzy_grants_extra_turn() {
    let mut dice = ScriptedDice::new(&[One, Two, Three, Heart, Heart, Lightning]);
    let (rules, mut state) = GameBuilder::new(2)
        .deck_order(deck(&["Frenzy"]))
        .build(&mut dice)
        .unwrap();
    state.monster_mut(P0).energy = 7;

    rules.apply_action(&mut state, P0, Action::LockIn, &mut dice).unwrap();
    assert_eq!(state.monster(P0).energy, 8);

    rules
        .apply_action(&mut state, P0, Action::BuyCard { slot: 0 }, &mut dice)
        .unwrap();
    assert!(!state.owns(P0, card("Frenzy")));
    assert_eq!(state.market.slots()[0], Some(card("Skyscraper")));

    rules.apply_action(&mut state, P0, Action::EndTurn, &mut dice).unwrap();

    assert_eq!(state.active(), P0);
    assert_eq!(state.phase(), Phase::Rolling);
    assert_eq!(state.dice.len(), 6);
    assert_eq!(state.dice.rerolls_left(), 2);
    assert_eq!(state.monster(P0).victory_points, 3);

    rules.apply_action(&mut state, P0, Action::LockIn, &mut dice).unwrap();
    assert_eq!(state.monster(P0).victory_points, 9);
    rules.apply_action(&mut state, P0, Action::EndTurn, &mut dice).unwrap();
    assert_eq!(state.active(), P1);
}

/// Frenzy bought out of turn belongs to the buyer: they get the extra
/// turn straight after their own next one.
#[test]
fn test_frenzy_bought_out_of_turn_goes_to_the_buyer() {
    let mut dice = ScriptedDice::new(&[One, Two, Three, Heart, Heart, Lightning]);
    let (rules, mut state) = GameBuilder::new(3)
        .deck_order(deck(&["Heal", "Energize", "Tanks", "Frenzy"]))
        .build(&mut dice)
        .unwrap();
    state.collections[P1].push_back(OwnedCard::new(card("Opportunist")));
    state.monster_mut(P0).energy = 2;
    state.monster_mut(P1).energy = 7;

    rules.apply_action(&mut state, P0, Action::SweepMarket, &mut dice).unwrap();
    assert_eq!(state.market.slots()[0], Some(card("Frenzy")));
    rules
        .apply_action(&mut state, P1, Action::BuyCard { slot: 0 }, &mut dice)
        .unwrap();
    assert!(state.turn.extra_turns.contains(&P1));
    assert!(!state.turn.extra_turns.contains(&P0));

    rules.apply_action(&mut state, P0, Action::LockIn, &mut dice).unwrap();
    rules.apply_action(&mut state, P0, Action::EndTurn, &mut dice).unwrap();
    assert_eq!(state.active(), P1);
    assert_eq!(state.turn.turn_number, 2);

    rules.apply_action(&mut state, P1, Action::LockIn, &mut dice).unwrap();
    rules.apply_action(&mut state, P1, Action::EndTurn, &mut dice).unwrap();
    assert_eq!(state.active(), P1);
    assert_eq!(state.turn.turn_number, 3);
    assert!(state.turn.extra_turns.is_empty());

    rules.apply_action(&mut state, P1, Action::LockIn, &mut dice).unwrap();
    rules.apply_action(&mut state, P1, Action::EndTurn, &mut dice).unwrap();
    assert_eq!(state.active(), P2);
}

/// Damage bought out of turn can kill the roller before the dice resolve;
/// the dead seat may still hand the turn on.
#[test]
fn test_roller_killed_out_of_turn_can_end_turn() {
    let mut dice = ScriptedDice::new(&[One, Two, Three, Heart, Heart, Lightning]);
    let (rules, mut state) = GameBuilder::new(3)
        .deck_order(deck(&["Heal", "Energize", "Tanks", "Fire Blast"]))
        .build(&mut dice)
        .unwrap();
    state.collections[P1].push_back(OwnedCard::new(card("Opportunist")));
    state.monster_mut(P0).health = 2;
    state.monster_mut(P0).energy = 2;
    state.monster_mut(P1).energy = 3;

    rules.apply_action(&mut state, P0, Action::SweepMarket, &mut dice).unwrap();
    rules
        .apply_action(&mut state, P1, Action::BuyCard { slot: 0 }, &mut dice)
        .unwrap();

    assert!(!state.monster(P0).alive);
    assert_eq!(state.phase(), Phase::Rolling);
    assert_eq!(rules.is_terminal(&state), None);
    assert_eq!(rules.legal_actions(&state, P0), vec![Action::EndTurn]);
    assert_eq!(
        illegal(rules.apply_action(&mut state, P0, Action::Roll, &mut dice)),
        IllegalAction::PlayerEliminated
    );

    rules.apply_action(&mut state, P0, Action::EndTurn, &mut dice).unwrap();
    assert_eq!(state.active(), P1);
    assert_eq!(state.phase(), Phase::Rolling);
    assert_eq!(state.monster(P2).health, 8);
}

#[test]
fn test_reaching_twenty_ends_the_game() {
    let mut dice = ScriptedDice::new(&[One, Two, Three, Heart, Heart, Lightning]);
    let (rules, mut state) = GameBuilder::new(2)
        .deck_order(deck(&["Corner Store"]))
        .build(&mut dice)
        .unwrap();
    state.monster_mut(P0).victory_points = 18;
    state.monster_mut(P0).energy = 2;

    rules.apply_action(&mut state, P0, Action::LockIn, &mut dice).unwrap();
    assert_eq!(rules.is_terminal(&state), None);

    rules
        .apply_action(&mut state, P0, Action::BuyCard { slot: 0 }, &mut dice)
        .unwrap();

    assert_eq!(rules.is_terminal(&state), Some(GameResult::Winner(P0)));
    assert_eq!(state.phase(), Phase::GameOver);
    assert_eq!(
        illegal(rules.apply_action(&mut state, P0, Action::EndTurn, &mut dice)),
        IllegalAction::GameOver
    );
    assert_eq!(
        illegal(rules.apply_action(&mut state, P1, Action::Roll, &mut dice)),
        IllegalAction::GameOver
    );
    assert!(rules.legal_actions(&state, P0).is_empty());
    assert!(rules.legal_actions(&state, P1).is_empty());
}

#[test]
fn test_lower_victory_target_from_config() {
    let config = RulesConfig::from_json(r#"{ "victory_points_to_win": 2 }"#).unwrap();
    let mut dice = ScriptedDice::new(&[Claw, Claw, Claw, One, One, One]);
    let (rules, mut state) = GameBuilder::new(2)
        .config(config)
        .deck_order(deck(&[]))
        .build(&mut dice)
        .unwrap();

    rules.apply_action(&mut state, P0, Action::LockIn, &mut dice).unwrap();

    assert_eq!(state.outcome, Some(GameResult::Winner(P0)));
}

#[test]
fn test_history_orders_actions() {
    let (rules, mut state, mut dice) = game(2, &[]);
    rules.apply_action(&mut state, P0, Action::ToggleHold { die: 0 }, &mut dice).unwrap();
    rules.apply_action(&mut state, P0, Action::LockIn, &mut dice).unwrap();
    rules.apply_action(&mut state, P0, Action::EndTurn, &mut dice).unwrap();

    let records: Vec<_> = state
        .history
        .iter()
        .map(|r| (r.player, r.action, r.turn, r.sequence))
        .collect();
    assert_eq!(
        records,
        vec![
            (P0, Action::ToggleHold { die: 0 }, 1, 0),
            (P0, Action::LockIn, 1, 1),
            (P0, Action::EndTurn, 1, 2),
        ]
    );
}
