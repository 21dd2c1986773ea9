//! The single gain path and the single damage path.
//!
//! Dice, cards and abilities all change health and energy through these
//! functions so card modifiers (Regeneration, Friend of Children, Armor
//! Plating, Wings, ...) apply no matter where the change came from.

use crate::cards::Effect;
use crate::core::{GameState, PlayerId, RandomSource};
use crate::dice::DieFace;

use super::passive::{has_effect, max_health, sum_effects};

/// Gain energy, plus any bonus on energy gains. Returns the amount gained.
pub fn gain_energy(state: &mut GameState, seat: PlayerId, amount: u32) -> u32 {
    if amount == 0 || !state.is_alive(seat) {
        return 0;
    }
    let bonus = sum_effects(state, seat, |e| match e {
        Effect::EnergyGainBonus(n) => Some(*n),
        _ => None,
    });
    let total = amount + bonus;
    state.monster_mut(seat).energy += total;
    total
}

/// Heal, plus any bonus on heals, never beyond maximum health.
///
/// Returns the health actually restored.
pub fn heal(state: &mut GameState, seat: PlayerId, amount: u32) -> u32 {
    if amount == 0 || !state.is_alive(seat) {
        return 0;
    }
    let bonus = sum_effects(state, seat, |e| match e {
        Effect::HealBonus(n) => Some(*n),
        _ => None,
    });
    let max = max_health(state, seat);
    let monster = state.monster_mut(seat);
    let healed = (amount + bonus).min(max.saturating_sub(monster.health));
    monster.health += healed;
    healed
}

/// Pull health back under a maximum that dropped when a card left.
pub fn clamp_health(state: &mut GameState, seat: PlayerId) {
    let max = max_health(state, seat);
    let monster = state.monster_mut(seat);
    monster.health = monster.health.min(max);
}

/// Deal damage to a monster.
///
/// Order: Wings, damage reduction, Camouflage rolls, clamp at zero, counters
/// from the source, heavy-hit energy, then elimination. Returns the health
/// actually lost.
pub fn apply_damage(
    state: &mut GameState,
    target: PlayerId,
    amount: u32,
    source: Option<PlayerId>,
    rng: &mut dyn RandomSource,
) -> u32 {
    if amount == 0 || !state.is_alive(target) {
        return 0;
    }
    if state.turn.wings.contains(&target) {
        let line = format!("{} shrugs off {amount} damage on its wings", state.name(target));
        state.log(line);
        return 0;
    }

    let reduction = sum_effects(state, target, |e| match e {
        Effect::DamageReduction(n) => Some(*n),
        _ => None,
    });
    let mut amount = amount.saturating_sub(reduction);

    if amount > 0 && has_effect(state, target, |e| matches!(e, Effect::Camouflage)) {
        let dodged = (0..amount)
            .filter(|_| rng.die_face() == DieFace::Heart)
            .count() as u32;
        if dodged > 0 {
            let line = format!("{} camouflages {dodged} damage", state.name(target));
            state.log(line);
        }
        amount -= dodged;
    }
    if amount == 0 {
        return 0;
    }

    let monster = state.monster_mut(target);
    let lost = amount.min(monster.health);
    monster.health -= lost;
    let remaining = monster.health;
    let line = format!("{} takes {lost} damage", state.name(target));
    state.log(line);

    if let Some(source) = source.filter(|&s| s != target) {
        let poison = sum_effects(state, source, |e| match e {
            Effect::PoisonOnHit(n) => Some(*n),
            _ => None,
        });
        let shrink = sum_effects(state, source, |e| match e {
            Effect::ShrinkOnHit(n) => Some(*n),
            _ => None,
        });
        let monster = state.monster_mut(target);
        monster.poison += poison;
        monster.shrink += shrink;
    }

    if remaining > 0 {
        let energy: u32 = super::passive::active_effects(state, target)
            .iter()
            .filter_map(|(_, e)| match e {
                Effect::EnergyOnHeavyHit { threshold, energy } if lost >= *threshold => {
                    Some(*energy)
                }
                _ => None,
            })
            .sum();
        gain_energy(state, target, energy);
    } else {
        eliminate(state, target);
    }

    lost
}

/// Handle a monster reaching zero health.
///
/// A monster with It Has a Child starts over instead. Otherwise it is out,
/// and every other living monster collects its elimination rewards before
/// this returns.
pub fn eliminate(state: &mut GameState, seat: PlayerId) {
    leave_tokyo(state, seat);

    if has_effect(state, seat, |e| matches!(e, Effect::Rebirth)) {
        state.collections[seat] = im::Vector::new();
        let base = state.config.max_health;
        let monster = state.monster_mut(seat);
        monster.victory_points = 0;
        monster.poison = 0;
        monster.shrink = 0;
        monster.health = base;
        tracing::info!(%seat, "monster reborn");
        let line = format!("{} is reborn", state.name(seat));
        state.log(line);
        return;
    }

    let monster = state.monster_mut(seat);
    monster.alive = false;
    monster.health = 0;
    tracing::info!(%seat, "monster eliminated");
    let line = format!("{} is eliminated", state.name(seat));
    state.log(line);

    for other in state.living_others(seat) {
        let reward = sum_effects(state, other, |e| match e {
            Effect::VictoryPointsOnElimination(n) => Some(*n),
            _ => None,
        });
        if reward > 0 {
            state.monster_mut(other).victory_points += reward;
            let line = format!("{} feasts for {reward} VP", state.name(other));
            state.log(line);
        }
    }
}

/// Put a monster in Tokyo and award the entry bonus.
pub fn enter_tokyo(state: &mut GameState, seat: PlayerId) {
    let bonus = state.config.tokyo_entry_bonus;
    state.tokyo.occupant = Some(seat);
    let monster = state.monster_mut(seat);
    monster.in_tokyo = true;
    monster.victory_points += bonus;
    let line = format!("{} enters Tokyo", state.name(seat));
    state.log(line);
}

/// Take a monster out of Tokyo if it is there.
pub fn leave_tokyo(state: &mut GameState, seat: PlayerId) {
    if state.tokyo.occupant == Some(seat) {
        state.tokyo.occupant = None;
        state.monster_mut(seat).in_tokyo = false;
        let line = format!("{} leaves Tokyo", state.name(seat));
        state.log(line);
    }
}
