//! The coordinator: validates actions and commits them atomically.
//!
//! Every action is checked against the phase, the acting seat and the
//! seat's cards before any randomness is drawn. It is then applied to a
//! clone of the state; the clone replaces the original only if the whole
//! action succeeded and the result passes the invariant check.

use crate::cards::{CardCatalog, CardId};
use crate::core::{
    Action, ActionRecord, GameSnapshot, GameState, IllegalAction, Phase, PlayerId, RandomSource,
    RulesError,
};
use crate::dice::DieFace;
use crate::effects::{self, abilities, clamp_health};
use crate::market::{purchase, MARKET_SLOTS};

use super::engine::{evaluate_outcome, GameResult, RulesEngine};
use super::turn;

/// When an action may be taken, and by whom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Timing {
    /// The active seat, while rolling.
    OwnRoll,
    /// Any other seat, while the active seat is rolling.
    OthersRoll,
    /// The active seat, after resolution with no attack pending.
    OwnResolved,
    /// The active seat, in any phase.
    OwnTurn,
    /// The Tokyo occupant being attacked.
    Decider,
    /// Any living seat, in any phase.
    Anytime,
}

fn timing(action: &Action) -> Timing {
    match action {
        Action::Roll
        | Action::ToggleHold { .. }
        | Action::LockIn
        | Action::BuyReroll
        | Action::UseSmokeCloud
        | Action::SetDie { .. }
        | Action::CullDie { .. }
        | Action::PlotTwist { .. } => Timing::OwnRoll,
        Action::PsychicProbe { .. } => Timing::OthersRoll,
        Action::BuyCard { .. }
        | Action::EndTurn
        | Action::HealingRay { .. }
        | Action::SellCard { .. }
        | Action::CopyCard { .. }
        | Action::ChargeBatteries { .. }
        | Action::BuyFromPile
        | Action::BuyFromMonster { .. } => Timing::OwnResolved,
        Action::SweepMarket => Timing::OwnTurn,
        Action::DecideYield { .. } => Timing::Decider,
        Action::RapidHeal | Action::ActivateWings => Timing::Anytime,
    }
}

fn check_timing(state: &GameState, seat: PlayerId, timing: Timing) -> Result<(), IllegalAction> {
    let active = seat == state.active();
    let phase = state.phase();
    match timing {
        Timing::OwnRoll => {
            if !active {
                return Err(IllegalAction::NotYourTurn);
            }
            if phase != Phase::Rolling {
                return Err(IllegalAction::WrongPhase);
            }
        }
        Timing::OthersRoll => {
            if active {
                return Err(IllegalAction::InvalidTarget);
            }
            if phase != Phase::Rolling {
                return Err(IllegalAction::WrongPhase);
            }
        }
        Timing::OwnResolved => {
            if !active {
                return Err(IllegalAction::NotYourTurn);
            }
            match phase {
                Phase::Resolved => {}
                Phase::AwaitingYieldDecision => return Err(IllegalAction::PendingDamage),
                _ => return Err(IllegalAction::WrongPhase),
            }
        }
        Timing::OwnTurn => {
            if !active {
                return Err(IllegalAction::NotYourTurn);
            }
        }
        Timing::Decider => {
            if phase != Phase::AwaitingYieldDecision {
                return Err(IllegalAction::WrongPhase);
            }
            if state.tokyo.decider != Some(seat) {
                return Err(IllegalAction::NotDecider);
            }
        }
        Timing::Anytime => {}
    }
    Ok(())
}

/// Tokyo rules coordinator.
///
/// Holds only static data; all game data lives in [`GameState`].
#[derive(Clone, Debug, Default)]
pub struct TokyoRules {
    catalog: CardCatalog,
}

impl TokyoRules {
    /// Create a coordinator over the standard card catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: CardCatalog::standard(),
        }
    }

    /// The card catalog.
    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    /// Check an action without changing anything.
    pub fn validate(
        &self,
        state: &GameState,
        seat: PlayerId,
        action: &Action,
    ) -> Result<(), IllegalAction> {
        if state.outcome.is_some() || state.phase() == Phase::GameOver {
            return Err(IllegalAction::GameOver);
        }
        if !state.has_seat(seat) {
            return Err(IllegalAction::NotYourTurn);
        }
        if !state.is_alive(seat) {
            if *action != Action::EndTurn {
                return Err(IllegalAction::PlayerEliminated);
            }
            if seat != state.active() {
                return Err(IllegalAction::NotYourTurn);
            }
            // Out-of-turn card damage can kill the roller before resolution.
            if state.phase() == Phase::AwaitingYieldDecision {
                return Err(IllegalAction::PendingDamage);
            }
            return Ok(());
        }

        // Opportunist buys sidestep the usual turn order.
        if let Action::BuyCard { slot } = *action {
            if seat != state.active() {
                if state.phase() == Phase::AwaitingYieldDecision {
                    return Err(IllegalAction::PendingDamage);
                }
                purchase::check_opportunist(state, seat, slot)?;
                purchase::check_buy(state, seat, slot)?;
                return Ok(());
            }
        }

        check_timing(state, seat, timing(action))?;

        match *action {
            Action::Roll => {
                let free = turn::free_reroll(state, seat);
                if state.dice.all_held() {
                    return Err(IllegalAction::AllDiceHeld);
                }
                if state.dice.rerolls_left() == 0 && !free {
                    return Err(IllegalAction::NoRerollsLeft);
                }
                Ok(())
            }
            Action::ToggleHold { die } => state.dice.check_index(die),
            Action::LockIn | Action::DecideYield { .. } | Action::EndTurn => Ok(()),
            Action::BuyCard { slot } => purchase::check_buy(state, seat, slot).map(|_| ()),
            Action::SweepMarket => purchase::check_sweep(state, seat),
            Action::BuyFromPile => purchase::check_buy_from_pile(state, seat).map(|_| ()),
            Action::BuyFromMonster { seller, card } => {
                if !state.has_seat(seller) {
                    return Err(IllegalAction::InvalidTarget);
                }
                purchase::check_buy_from_monster(state, seat, seller, card).map(|_| ())
            }
            Action::HealingRay { target, .. } if !state.has_seat(target) => {
                Err(IllegalAction::InvalidTarget)
            }
            _ => abilities::check(state, seat, action),
        }
    }

    fn dispatch(
        &self,
        state: &mut GameState,
        seat: PlayerId,
        action: &Action,
        rng: &mut dyn RandomSource,
    ) -> Result<(), RulesError> {
        match *action {
            Action::Roll => turn::roll(state, rng),
            Action::ToggleHold { die } => state.dice.toggle_hold(die)?,
            Action::LockIn => turn::resolve_dice(state, rng),
            Action::DecideYield { yield_tokyo } => turn::decide_yield(state, yield_tokyo, rng),
            Action::BuyCard { slot } => purchase::buy_card(state, seat, slot, rng)?,
            Action::SweepMarket => purchase::sweep(state, seat)?,
            Action::EndTurn => turn::end_turn(state, rng),
            Action::BuyFromPile => purchase::buy_from_pile(state, seat, rng)?,
            Action::BuyFromMonster { seller, card } => {
                purchase::buy_from_monster(state, seat, seller, card)?;
            }
            _ => abilities::apply(state, seat, action, rng)?,
        }
        Ok(())
    }

    /// Validate, apply to a copy, check invariants, then commit.
    ///
    /// On any error `state` is left exactly as it was.
    pub fn transition(
        &self,
        state: &mut GameState,
        seat: PlayerId,
        action: Action,
        rng: &mut dyn RandomSource,
    ) -> Result<(), RulesError> {
        if let Err(reason) = self.validate(state, seat, &action) {
            tracing::debug!(%seat, action = action.name(), %reason, "action rejected");
            return Err(reason.into());
        }

        let turn = state.turn.turn_number;
        let sequence = state.turn.action_sequence;

        let mut next = state.clone();
        self.dispatch(&mut next, seat, &action, rng)?;

        for p in PlayerId::all(next.player_count()) {
            clamp_health(&mut next, p);
        }

        next.history
            .push_back(ActionRecord::new(seat, action, turn, sequence));
        // EndTurn already started a fresh count for the next turn.
        if next.turn.turn_number == turn {
            next.turn.action_sequence += 1;
        }

        if let Some(outcome) = evaluate_outcome(&next) {
            next.turn.phase = Phase::GameOver;
            next.tokyo.clear_pending();
            tracing::info!(?outcome, "game over");
            next.outcome = Some(outcome);
        }

        next.check_invariants()?;
        tracing::debug!(%seat, action = action.name(), phase = ?next.turn.phase, "action applied");
        *state = next;
        Ok(())
    }

    /// The seat that alone may submit the yield decision.
    #[must_use]
    pub fn decider(&self, state: &GameState) -> Option<PlayerId> {
        match state.phase() {
            Phase::AwaitingYieldDecision => state.tokyo.decider,
            _ => None,
        }
    }

    /// Read-only view for hosts.
    #[must_use]
    pub fn snapshot(&self, state: &GameState) -> GameSnapshot {
        GameSnapshot::capture(state)
    }

    /// The top of the pile as seen by `seat` (only with Made in a Lab).
    #[must_use]
    pub fn visible_pile_top(&self, state: &GameState, seat: PlayerId) -> Option<CardId> {
        purchase::peek_pile(state, seat)
    }

    fn candidates(&self, state: &GameState, seat: PlayerId) -> Vec<Action> {
        let dice = state.dice.len();
        let mut out = vec![
            Action::Roll,
            Action::LockIn,
            Action::DecideYield { yield_tokyo: false },
            Action::DecideYield { yield_tokyo: true },
            Action::SweepMarket,
            Action::EndTurn,
            Action::BuyReroll,
            Action::UseSmokeCloud,
            Action::RapidHeal,
            Action::ActivateWings,
            Action::BuyFromPile,
        ];
        out.extend((0..dice).map(|die| Action::ToggleHold { die }));
        out.extend((0..MARKET_SLOTS).map(|slot| Action::BuyCard { slot }));
        out.extend((0..dice).map(|die| Action::CullDie { die }));
        out.extend((0..dice).map(|die| Action::PsychicProbe { die }));
        for die in 0..dice {
            for face in DieFace::ALL {
                out.push(Action::SetDie { die, face });
                out.push(Action::PlotTwist { die, face });
            }
        }
        for target in state.living_others(seat) {
            for amount in 1..=state.turn.unspent_hearts {
                out.push(Action::HealingRay { target, amount });
            }
            for owned in state.collection(target).iter() {
                out.push(Action::BuyFromMonster { seller: target, card: owned.id });
            }
        }
        out.extend(cards_in_play(state, seat).into_iter().map(|card| Action::CopyCard { card }));
        for owned in state.collection(seat).iter() {
            out.push(Action::SellCard { card: owned.id });
        }
        for amount in 1..=state.monster(seat).energy {
            out.push(Action::ChargeBatteries { amount });
        }
        out
    }
}

impl RulesEngine for TokyoRules {
    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        if !state.has_seat(player) {
            return Vec::new();
        }
        self.candidates(state, player)
            .into_iter()
            .filter(|a| self.validate(state, player, a).is_ok())
            .collect()
    }

    fn apply_action(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: Action,
        rng: &mut dyn RandomSource,
    ) -> Result<(), RulesError> {
        self.transition(state, player, action, rng)
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state.outcome.clone().or_else(|| evaluate_outcome(state))
    }
}

/// Distinct non-Mimic cards held by living monsters other than `except`.
#[must_use]
pub fn cards_in_play(state: &GameState, except: PlayerId) -> Vec<CardId> {
    let mut cards: Vec<CardId> = state
        .living_others(except)
        .into_iter()
        .flat_map(|p| state.collection(p).iter().map(|c| c.id).collect::<Vec<_>>())
        .filter(|&c| !effects::is_mimic(c))
        .collect();
    cards.sort();
    cards.dedup();
    cards
}
