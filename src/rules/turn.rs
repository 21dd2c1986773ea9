//! Turn state machine.
//!
//! ```text
//! Rolling ──roll/lock-in──▶ Resolved ──end turn──▶ (next) Rolling
//!                  │            ▲
//!                  └──attack────┤
//!                    on Tokyo   │
//!                       ▼       │
//!             AwaitingYieldDecision
//! ```
//!
//! Functions here assume the coordinator already validated the action.

use crate::cards::Effect;
use crate::core::{GameState, Phase, PlayerId, RandomSource};
use crate::dice::DieFace;
use crate::effects::{
    apply_damage, end_of_turn, enter_tokyo, gain_energy, has_effect, heal, leave_tokyo,
    score_dice, start_of_turn, sum_effects,
};

use super::engine::evaluate_outcome;

/// Start `seat`'s turn: reset bookkeeping, pay start-of-turn bonuses and
/// roll every die.
pub fn begin_turn(state: &mut GameState, seat: PlayerId, rng: &mut dyn RandomSource) {
    state.turn.reset_for(seat);
    state.tokyo.clear_pending();
    state.log = im::Vector::new();
    state.market.clear_fresh();

    start_of_turn(state, seat);

    let extra_dice = sum_effects(state, seat, |e| match e {
        Effect::ExtraDie(n) => Some(*n),
        _ => None,
    });
    let extra_rerolls = sum_effects(state, seat, |e| match e {
        Effect::ExtraReroll(n) => Some(*n),
        _ => None,
    });
    let removed = state.monster(seat).shrink as usize + state.turn.dice_penalty;
    let count = (state.config.dice_count + extra_dice as usize)
        .saturating_sub(removed)
        .max(1);
    state.turn.dice_penalty = 0;

    let rerolls = state.config.base_rerolls + extra_rerolls;
    state.dice.begin_turn(count, rerolls, rng);

    let line = format!("{}'s turn: rolled {}", state.name(seat), faces(state));
    state.log(line);
    tracing::debug!(%seat, turn = state.turn.turn_number, dice = count, "turn started");
}

/// Is the next reroll free (Background Dweller)?
#[must_use]
pub fn free_reroll(state: &GameState, seat: PlayerId) -> bool {
    has_effect(state, seat, |e| match e {
        Effect::FreeRerollOf(face) => !state.dice.all_held() && state.dice.unheld_all_show(*face),
        _ => false,
    })
}

/// Reroll every unheld die; resolve once the last reroll is spent.
pub fn roll(state: &mut GameState, rng: &mut dyn RandomSource) {
    let seat = state.active();
    let free = free_reroll(state, seat);
    if !free {
        state.dice.consume_reroll();
    }
    state.dice.roll_unheld(rng);

    let line = format!("{} rerolls: {}", state.name(seat), faces(state));
    state.log(line);

    if !free && state.dice.rerolls_left() == 0 {
        resolve_dice(state, rng);
    }
}

/// Score the dice and apply the outcome.
///
/// Order: modifiers, victory points, hearts, energy, damage (which may
/// defer against Tokyo), damage-dependent passives, then an empty Tokyo is
/// claimed by the roller.
pub fn resolve_dice(state: &mut GameState, rng: &mut dyn RandomSource) {
    let seat = state.active();
    state.dice.exhaust();
    let started_outside = !state.monster(seat).in_tokyo;
    let scored = score_dice(state, seat);

    state.monster_mut(seat).victory_points += scored.victory_points;

    let mut hearts = scored.heal;
    let cured = cure_counters(state, seat, &mut hearts);
    let healed = heal(state, seat, hearts);
    state.turn.unspent_hearts = scored
        .hearts
        .saturating_sub(cured + hearts.min(healed));

    gain_energy(state, seat, scored.energy);

    if let Some(penalty) = scored.extra_turn {
        state.turn.extra_turns.insert(seat);
        state.turn.dice_penalty = state.turn.dice_penalty.max(penalty);
    }

    let line = format!(
        "{} resolves: {} VP, {} damage, {healed} healed, {} energy",
        state.name(seat),
        scored.victory_points,
        scored.damage,
        scored.energy
    );
    state.log(line);

    let mut dealt = false;
    let mut deferred = false;
    if scored.damage > 0 {
        let occupant = state.tokyo.occupant;
        if occupant == Some(seat) {
            for target in state.living_others(seat) {
                apply_damage(state, target, scored.damage, Some(seat), rng);
                dealt = true;
            }
        } else {
            if has_effect(state, seat, |e| matches!(e, Effect::HitAllOthers)) {
                for target in state.living_others(seat) {
                    if Some(target) != occupant {
                        apply_damage(state, target, scored.damage, Some(seat), rng);
                        dealt = true;
                    }
                }
            }
            if let Some(occupant) = occupant {
                // Area damage above may already have removed the occupant.
                if state.is_alive(occupant) && state.tokyo.occupant == Some(occupant) {
                    state.tokyo.pending_damage = scored.damage;
                    state.tokyo.attacker = Some(seat);
                    state.tokyo.decider = Some(occupant);
                    deferred = true;
                }
            }
        }

        let splash = sum_effects(state, seat, |e| match e {
            Effect::NeighbourSplash(n) => Some(*n),
            _ => None,
        });
        if splash > 0 {
            for neighbour in state.living_neighbours(seat) {
                apply_damage(state, neighbour, splash, Some(seat), rng);
            }
        }
    }

    if dealt || deferred {
        let reward = sum_effects(state, seat, |e| match e {
            Effect::VictoryPointsOnDamage(n) => Some(*n),
            _ => None,
        });
        state.monster_mut(seat).victory_points += reward;
    } else if started_outside {
        let reward = sum_effects(state, seat, |e| match e {
            Effect::VictoryPointsWithoutDamage(n) => Some(*n),
            _ => None,
        });
        state.monster_mut(seat).victory_points += reward;
    }

    if state.tokyo.occupant.is_none() && state.is_alive(seat) {
        enter_tokyo(state, seat);
    }

    state.turn.phase = if deferred {
        Phase::AwaitingYieldDecision
    } else {
        Phase::Resolved
    };
    tracing::debug!(%seat, phase = ?state.turn.phase, "dice resolved");
}

/// Hearts remove poison counters first, then shrink counters.
fn cure_counters(state: &mut GameState, seat: PlayerId, hearts: &mut u32) -> u32 {
    let monster = state.monster_mut(seat);
    let poison = (*hearts).min(monster.poison);
    monster.poison -= poison;
    *hearts -= poison;
    let shrink = (*hearts).min(monster.shrink);
    monster.shrink -= shrink;
    *hearts -= shrink;
    poison + shrink
}

/// The occupant answers the pending attack.
pub fn decide_yield(state: &mut GameState, yield_tokyo: bool, rng: &mut dyn RandomSource) {
    let (Some(occupant), Some(attacker)) = (state.tokyo.decider, state.tokyo.attacker) else {
        return;
    };
    let damage = state.tokyo.pending_damage;
    state.tokyo.clear_pending();
    state.turn.phase = Phase::Resolved;

    if yield_tokyo {
        let safe = has_effect(state, occupant, |e| matches!(e, Effect::SafeYield));
        if !safe {
            apply_damage(state, occupant, damage, Some(attacker), rng);
        }
        leave_tokyo(state, occupant);
        if state.is_alive(attacker) {
            enter_tokyo(state, attacker);
        }
        let retaliation = sum_effects(state, occupant, |e| match e {
            Effect::YieldRetaliation(n) => Some(*n),
            _ => None,
        });
        if retaliation > 0 && state.is_alive(occupant) {
            apply_damage(state, attacker, retaliation, Some(occupant), rng);
        }
    } else {
        let line = format!("{} stays in Tokyo", state.name(occupant));
        state.log(line);
        apply_damage(state, occupant, damage, Some(attacker), rng);
    }

    tracing::debug!(%occupant, yield_tokyo, damage, "yield decided");
}

/// Finish the turn: end-of-turn passives, then the next turn unless the
/// game is decided.
pub fn end_turn(state: &mut GameState, rng: &mut dyn RandomSource) {
    let seat = state.active();
    end_of_turn(state, seat, rng);
    state.turn.wings = im::HashSet::new();

    if evaluate_outcome(state).is_some() {
        return;
    }

    let again = state.turn.extra_turns.remove(&seat).is_some();
    if again && state.is_alive(seat) {
        let line = format!("{} takes another turn", state.name(seat));
        state.log(line);
        begin_turn(state, seat, rng);
        return;
    }

    state.turn.dice_penalty = 0;
    if let Some(next) = state.next_living(seat) {
        begin_turn(state, next, rng);
    }
}

fn faces(state: &GameState) -> String {
    state
        .dice
        .faces()
        .iter()
        .map(DieFace::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
