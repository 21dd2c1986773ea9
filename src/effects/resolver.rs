//! Effect resolution at each trigger point of a turn.
//!
//! - [`score_dice`]: base dice scoring plus resolution-time modifiers
//! - [`acquire_card`]: purchase-time effects and collection bookkeeping
//! - [`start_of_turn`] / [`end_of_turn`]: timed passives
//!
//! All of them iterate the effect table; none look at a card id.

use crate::cards::{card_definition, AttackCondition, CardId, Effect, OwnedCard};
use crate::core::{GameState, PlayerId, RandomSource};
use crate::dice::{count_faces, resolve, DieFace};

use super::damage::{apply_damage, enter_tokyo, gain_energy, heal, leave_tokyo};
use super::passive::{active_effects, sum_effects};

/// Dice outcome after card modifiers, before anything is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoredDice {
    pub victory_points: u32,
    pub damage: u32,
    /// Hearts that may heal (zero in Tokyo).
    pub heal: u32,
    /// All hearts rolled, in or out of Tokyo.
    pub hearts: u32,
    pub energy: u32,
    /// Dice penalty for an extra turn earned by a combo.
    pub extra_turn: Option<usize>,
}

/// Score the active dice for `seat`.
#[must_use]
pub fn score_dice(state: &GameState, seat: PlayerId) -> ScoredDice {
    let faces = state.dice.faces();
    let in_tokyo = state.monster(seat).in_tokyo;
    let base = resolve(faces, in_tokyo);
    let counts = count_faces(faces);
    let claws = counts.of(DieFace::Claw) > 0;
    let against_tokyo = !in_tokyo && state.tokyo.occupant.is_some_and(|o| o != seat);

    let mut scored = ScoredDice {
        victory_points: base.victory_points,
        damage: base.damage,
        heal: base.heal,
        hearts: counts.of(DieFace::Heart),
        energy: base.energy,
        extra_turn: None,
    };

    for (_, effect) in active_effects(state, seat) {
        match effect {
            Effect::BonusDamage { amount, when } => {
                let applies = match when {
                    AttackCondition::Always => true,
                    AttackCondition::WithClaws => claws,
                    AttackCondition::FromTokyo => claws && in_tokyo,
                    AttackCondition::AgainstTokyo => claws && against_tokyo,
                };
                if applies {
                    scored.damage += amount;
                }
            }
            Effect::ComboReward { combo, victory_points, damage } if combo.matches(&counts) => {
                scored.victory_points += victory_points;
                scored.damage += damage;
            }
            Effect::ComboExtraTurn { combo, dice_penalty } if combo.matches(&counts) => {
                let penalty = scored.extra_turn.unwrap_or(0).max(dice_penalty);
                scored.extra_turn = Some(penalty);
            }
            _ => {}
        }
    }

    scored
}

/// Pay a card's purchase-time effects for `buyer`.
///
/// Keep cards join the collection first so their own clauses (Even Bigger's
/// heal) see the new maximum; discard cards only run their effects.
pub fn acquire_card(state: &mut GameState, buyer: PlayerId, card: CardId, rng: &mut dyn RandomSource) {
    let Some(def) = card_definition(card) else {
        return;
    };

    let purchase_bonus = sum_effects(state, buyer, |e| match e {
        Effect::VictoryPointsOnPurchase(n) => Some(*n),
        _ => None,
    });
    state.monster_mut(buyer).victory_points += purchase_bonus;

    let line = format!("{} buys {}", state.name(buyer), def.name);
    state.log(line);

    if def.is_keep() {
        let charges = def
            .effects
            .iter()
            .filter_map(|e| match e {
                Effect::Charges(n) => Some(*n),
                _ => None,
            })
            .sum();
        state.collections[buyer].push_back(OwnedCard::new(card).with_charges(charges));
    }

    run_immediate(state, buyer, def.effects, rng);
}

/// Apply one-shot clauses in table order.
pub fn run_immediate(
    state: &mut GameState,
    seat: PlayerId,
    effects: &[Effect],
    rng: &mut dyn RandomSource,
) {
    for effect in effects.iter().filter(|e| e.is_immediate()) {
        match *effect {
            Effect::GainVictoryPoints(n) => state.monster_mut(seat).victory_points += n,
            Effect::GainEnergy(n) => {
                gain_energy(state, seat, n);
            }
            Effect::Heal(n) => {
                heal(state, seat, n);
            }
            Effect::TakeDamage(n) => {
                apply_damage(state, seat, n, None, rng);
            }
            Effect::DamageOthers(n) => {
                for other in state.living_others(seat) {
                    apply_damage(state, other, n, Some(seat), rng);
                }
            }
            Effect::DamageEveryone(n) => {
                let living: Vec<_> = state.living().collect();
                for target in living {
                    apply_damage(state, target, n, Some(seat), rng);
                }
            }
            Effect::OthersLoseVictoryPoints(n) => {
                for other in state.living_others(seat) {
                    state.monster_mut(other).lose_victory_points(n);
                }
            }
            Effect::OthersLoseHalfEnergy => {
                for other in state.living_others(seat) {
                    let monster = state.monster_mut(other);
                    monster.energy -= monster.energy / 2;
                }
            }
            Effect::SeizeTokyo => {
                if state.is_alive(seat) && state.tokyo.occupant != Some(seat) {
                    if let Some(previous) = state.tokyo.occupant {
                        leave_tokyo(state, previous);
                    }
                    enter_tokyo(state, seat);
                }
            }
            Effect::ExtraTurn => {
                state.turn.extra_turns.insert(seat);
            }
            _ => {}
        }
    }
}

/// Start-of-turn passives for the monster about to roll.
pub fn start_of_turn(state: &mut GameState, seat: PlayerId) {
    if state.monster(seat).in_tokyo {
        let bonus = state.config.tokyo_start_bonus
            + sum_effects(state, seat, |e| match e {
                Effect::TokyoStartBonus(n) => Some(*n),
                _ => None,
            });
        state.monster_mut(seat).victory_points += bonus;
        let line = format!("{} starts in Tokyo for {bonus} VP", state.name(seat));
        state.log(line);
    }

    // Batteries pay out from their own charges.
    let mut drained = Vec::new();
    for (index, effect) in active_effects(state, seat) {
        let Effect::Ability(crate::cards::Ability::Batteries { per_turn }) = effect else {
            continue;
        };
        let card = &mut state.collections[seat][index];
        let taken = per_turn.min(card.charges);
        card.charges -= taken;
        let empty = taken > 0 && card.charges == 0;
        state.monster_mut(seat).energy += taken;
        if empty {
            drained.push(index);
        }
    }
    for index in drained.into_iter().rev() {
        state.discard_card(seat, index);
        let line = format!("{}'s batteries run dry", state.name(seat));
        state.log(line);
    }
}

/// End-of-turn passives for the monster whose turn ends, then poison.
pub fn end_of_turn(state: &mut GameState, seat: PlayerId, rng: &mut dyn RandomSource) {
    if !state.is_alive(seat) {
        return;
    }

    for (_, effect) in active_effects(state, seat) {
        match effect {
            Effect::VictoryPointsPerEnergy(per) if per > 0 => {
                let points = state.monster(seat).energy / per;
                state.monster_mut(seat).victory_points += points;
            }
            Effect::EnergyWhenEmpty(n) if state.monster(seat).energy == 0 => {
                gain_energy(state, seat, n);
            }
            Effect::UnderdogBonus(n) => {
                let mine = state.monster(seat).victory_points;
                let others = state.living_others(seat);
                let fewest = !others.is_empty()
                    && others
                        .iter()
                        .all(|&o| state.monster(o).victory_points > mine);
                if fewest {
                    state.monster_mut(seat).victory_points += n;
                }
            }
            _ => {}
        }
    }

    let poison = state.monster(seat).poison;
    if poison > 0 {
        let line = format!("{} suffers {poison} poison", state.name(seat));
        state.log(line);
        apply_damage(state, seat, poison, None, rng);
    }
}
