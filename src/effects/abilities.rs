//! Activated card abilities.
//!
//! [`check`] verifies that a seat owns the card behind an ability action and
//! can pay for it; it never mutates. [`apply`] performs the ability and
//! assumes `check` passed. Phase and turn order are checked by the caller.

use crate::cards::{card_definition, Ability, CardId, Effect};
use crate::core::{Action, GameState, IllegalAction, PlayerId, RandomSource, RulesError};
use crate::dice::DieFace;

use super::damage::{clamp_health, heal};
use super::passive::{find_ability, is_mimic, max_health};

fn require(
    state: &GameState,
    seat: PlayerId,
    test: impl Fn(&Ability) -> bool,
) -> Result<(usize, Ability), IllegalAction> {
    find_ability(state, seat, test).ok_or(IllegalAction::MissingAbility)
}

fn can_pay(state: &GameState, seat: PlayerId, cost: u32) -> Result<(), IllegalAction> {
    if state.monster(seat).energy >= cost {
        Ok(())
    } else {
        Err(IllegalAction::CannotAfford)
    }
}

/// Resource and ownership checks for an ability action.
///
/// Returns `Ok` for actions that are not abilities.
pub fn check(state: &GameState, seat: PlayerId, action: &Action) -> Result<(), IllegalAction> {
    match *action {
        Action::BuyReroll => {
            let (_, ability) = require(state, seat, |a| matches!(a, Ability::PaidReroll { .. }))?;
            if let Ability::PaidReroll { cost } = ability {
                can_pay(state, seat, cost)?;
            }
            Ok(())
        }
        Action::UseSmokeCloud => {
            let (index, _) = require(state, seat, |a| matches!(a, Ability::ChargedReroll))?;
            if state.collection(seat)[index].charges == 0 {
                return Err(IllegalAction::AbilityExhausted);
            }
            Ok(())
        }
        Action::SetDie { die, .. } => {
            let (_, ability) = require(state, seat, |a| matches!(a, Ability::Stretch { .. }))?;
            if let Ability::Stretch { cost } = ability {
                can_pay(state, seat, cost)?;
            }
            state.dice.check_index(die)
        }
        Action::CullDie { die } => {
            require(state, seat, |a| matches!(a, Ability::Cull { .. }))?;
            if state.turn.cull_used {
                return Err(IllegalAction::AbilityExhausted);
            }
            state.dice.check_index(die)
        }
        Action::PlotTwist { die, .. } => {
            require(state, seat, |a| matches!(a, Ability::PlotTwist))?;
            state.dice.check_index(die)
        }
        Action::PsychicProbe { die } => {
            require(state, seat, |a| matches!(a, Ability::PsychicProbe))?;
            if state.turn.probed_by.contains(&seat) {
                return Err(IllegalAction::AbilityExhausted);
            }
            state.dice.check_index(die)?;
            if state.dice.held()[die] {
                return Err(IllegalAction::InvalidTarget);
            }
            Ok(())
        }
        Action::RapidHeal => {
            let (_, ability) = require(state, seat, |a| matches!(a, Ability::RapidHeal { .. }))?;
            if let Ability::RapidHeal { cost, .. } = ability {
                can_pay(state, seat, cost)?;
            }
            if state.monster(seat).health >= max_health(state, seat) {
                return Err(IllegalAction::InvalidTarget);
            }
            Ok(())
        }
        Action::ActivateWings => {
            let (_, ability) = require(state, seat, |a| matches!(a, Ability::Wings { .. }))?;
            if state.turn.wings.contains(&seat) {
                return Err(IllegalAction::AbilityExhausted);
            }
            if let Ability::Wings { cost } = ability {
                can_pay(state, seat, cost)?;
            }
            Ok(())
        }
        Action::HealingRay { target, amount } => {
            require(state, seat, |a| matches!(a, Ability::HealingRay { .. }))?;
            if target == seat || !state.is_alive(target) {
                return Err(IllegalAction::InvalidTarget);
            }
            if amount == 0 || amount > state.turn.unspent_hearts {
                return Err(IllegalAction::AbilityExhausted);
            }
            if state.monster(target).health >= max_health(state, target) {
                return Err(IllegalAction::InvalidTarget);
            }
            Ok(())
        }
        Action::SellCard { card } => {
            require(state, seat, |a| matches!(a, Ability::Metamorph))?;
            if !state.owns(seat, card) {
                return Err(IllegalAction::CardNotOwned);
            }
            Ok(())
        }
        Action::CopyCard { card } => {
            let (index, ability) = require(state, seat, |a| matches!(a, Ability::Mimic { .. }))?;
            let owned = state.collection(seat)[index];
            if is_mimic(card) || owned.copy_of == Some(card) {
                return Err(IllegalAction::InvalidTarget);
            }
            let held_elsewhere = state
                .living_others(seat)
                .into_iter()
                .any(|other| state.owns(other, card));
            if !held_elsewhere {
                return Err(IllegalAction::CardNotOwned);
            }
            if let (Some(_), Ability::Mimic { change_cost }) = (owned.copy_of, ability) {
                can_pay(state, seat, change_cost)?;
            }
            Ok(())
        }
        Action::ChargeBatteries { amount } => {
            require(state, seat, |a| matches!(a, Ability::Batteries { .. }))?;
            if amount == 0 {
                return Err(IllegalAction::InvalidTarget);
            }
            can_pay(state, seat, amount)
        }
        _ => Ok(()),
    }
}

/// Perform an ability action that passed [`check`].
pub fn apply(
    state: &mut GameState,
    seat: PlayerId,
    action: &Action,
    rng: &mut dyn RandomSource,
) -> Result<(), RulesError> {
    match *action {
        Action::BuyReroll => {
            let (_, ability) = require(state, seat, |a| matches!(a, Ability::PaidReroll { .. }))?;
            if let Ability::PaidReroll { cost } = ability {
                pay(state, seat, cost)?;
            }
            state.dice.add_rerolls(1);
            log(state, seat, "buys a reroll");
        }
        Action::UseSmokeCloud => {
            let (index, _) = require(state, seat, |a| matches!(a, Ability::ChargedReroll))?;
            let card = &mut state.collections[seat][index];
            card.charges = card.charges.saturating_sub(1);
            let empty = card.charges == 0;
            state.dice.add_rerolls(1);
            log(state, seat, "hides in smoke for a reroll");
            if empty {
                state.discard_card(seat, index);
            }
        }
        Action::SetDie { die, face } => {
            let (_, ability) = require(state, seat, |a| matches!(a, Ability::Stretch { .. }))?;
            if let Ability::Stretch { cost } = ability {
                pay(state, seat, cost)?;
            }
            state.dice.set_face(die, face)?;
            log(state, seat, &format!("stretches die {die} to {face}"));
        }
        Action::CullDie { die } => {
            let (_, ability) = require(state, seat, |a| matches!(a, Ability::Cull { .. }))?;
            if let Ability::Cull { face } = ability {
                state.dice.set_face(die, face)?;
            }
            state.turn.cull_used = true;
            log(state, seat, &format!("culls die {die}"));
        }
        Action::PlotTwist { die, face } => {
            let (index, _) = require(state, seat, |a| matches!(a, Ability::PlotTwist))?;
            state.dice.set_face(die, face)?;
            state.discard_card(seat, index);
            log(state, seat, &format!("twists die {die} to {face}"));
        }
        Action::PsychicProbe { die } => {
            let (index, _) = require(state, seat, |a| matches!(a, Ability::PsychicProbe))?;
            let face = state.dice.reroll_die(die, rng)?;
            state.turn.probed_by.insert(seat);
            log(state, seat, &format!("probes die {die}: {face}"));
            if face == DieFace::Heart {
                state.discard_card(seat, index);
            }
        }
        Action::RapidHeal => {
            let (_, ability) = require(state, seat, |a| matches!(a, Ability::RapidHeal { .. }))?;
            if let Ability::RapidHeal { cost, heal: amount } = ability {
                pay(state, seat, cost)?;
                heal(state, seat, amount);
            }
            log(state, seat, "heals rapidly");
        }
        Action::ActivateWings => {
            let (_, ability) = require(state, seat, |a| matches!(a, Ability::Wings { .. }))?;
            if let Ability::Wings { cost } = ability {
                pay(state, seat, cost)?;
            }
            state.turn.wings.insert(seat);
            log(state, seat, "takes wing");
        }
        Action::HealingRay { target, amount } => {
            let (_, ability) = require(state, seat, |a| matches!(a, Ability::HealingRay { .. }))?;
            let healed = heal(state, target, amount);
            state.turn.unspent_hearts -= amount.min(state.turn.unspent_hearts);
            if let Ability::HealingRay { price_per_point } = ability {
                let patient = state.monster_mut(target);
                let fee = (price_per_point * healed).min(patient.energy);
                patient.energy -= fee;
                state.monster_mut(seat).energy += fee;
                let line = format!(
                    "{} heals {} for {healed} and collects {fee} energy",
                    state.name(seat),
                    state.name(target)
                );
                state.log(line);
            }
        }
        Action::SellCard { card } => {
            let index = state.card_index(seat, card).ok_or(IllegalAction::CardNotOwned)?;
            state.discard_card(seat, index);
            let refund = card_definition(card).map_or(0, |def| def.cost);
            state.monster_mut(seat).energy += refund;
            clamp_health(state, seat);
            log(state, seat, &format!("metamorphoses {} for {refund} energy", card_name(card)));
        }
        Action::CopyCard { card } => {
            let (index, ability) = require(state, seat, |a| matches!(a, Ability::Mimic { .. }))?;
            let previous = state.collection(seat)[index].copy_of;
            if let (Some(_), Ability::Mimic { change_cost }) = (previous, ability) {
                pay(state, seat, change_cost)?;
            }
            let charges = card_definition(card).map_or(0, |def| {
                def.effects
                    .iter()
                    .filter_map(|e| match e {
                        Effect::Charges(n) => Some(*n),
                        _ => None,
                    })
                    .sum()
            });
            let mimic = &mut state.collections[seat][index];
            mimic.copy_of = Some(card);
            mimic.charges = charges;
            clamp_health(state, seat);
            log(state, seat, &format!("mimics {}", card_name(card)));
        }
        Action::ChargeBatteries { amount } => {
            let (index, _) = require(state, seat, |a| matches!(a, Ability::Batteries { .. }))?;
            pay(state, seat, amount)?;
            state.collections[seat][index].charges += amount;
            log(state, seat, &format!("charges batteries with {amount} energy"));
        }
        _ => {}
    }
    Ok(())
}

fn pay(state: &mut GameState, seat: PlayerId, cost: u32) -> Result<(), IllegalAction> {
    if state.monster_mut(seat).spend_energy(cost) {
        Ok(())
    } else {
        Err(IllegalAction::CannotAfford)
    }
}

fn log(state: &mut GameState, seat: PlayerId, what: &str) {
    let line = format!("{} {what}", state.name(seat));
    state.log(line);
}

fn card_name(card: CardId) -> &'static str {
    card_definition(card).map_or("a card", |def| def.name)
}
