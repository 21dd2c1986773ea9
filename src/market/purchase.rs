//! Paid market actions.
//!
//! Each action has a pure `check_*` that returns what would be bought, and
//! an apply function that assumes the check passed. Turn-order and phase
//! rules for the acting seat are enforced by the coordinator.

use crate::cards::{card_definition, Ability, CardId, Effect};
use crate::core::{GameState, IllegalAction, PlayerId, RandomSource, RulesError};
use crate::effects::{acquire_card, clamp_health, effective_cost, find_ability, sum_effects};

fn price(state: &GameState, seat: PlayerId, card: CardId) -> Result<u32, IllegalAction> {
    let cost = effective_cost(state, seat, card).ok_or(IllegalAction::InvalidTarget)?;
    if state.monster(seat).energy < cost {
        return Err(IllegalAction::CannotAfford);
    }
    Ok(cost)
}

fn charge(state: &mut GameState, seat: PlayerId, cost: u32) -> Result<(), IllegalAction> {
    if state.monster_mut(seat).spend_energy(cost) {
        Ok(())
    } else {
        Err(IllegalAction::CannotAfford)
    }
}

/// Can `seat` afford the card in `slot`?
pub fn check_buy(state: &GameState, seat: PlayerId, slot: usize) -> Result<CardId, IllegalAction> {
    let card = state.market.slot(slot)?.ok_or(IllegalAction::EmptySlot)?;
    price(state, seat, card)?;
    Ok(card)
}

/// Extra conditions for buying outside one's own turn with Opportunist.
pub fn check_opportunist(state: &GameState, seat: PlayerId, slot: usize) -> Result<(), IllegalAction> {
    find_ability(state, seat, |a| matches!(a, Ability::Opportunist))
        .ok_or(IllegalAction::NotYourTurn)?;
    if !state.market.is_fresh(slot) {
        return Err(IllegalAction::InvalidTarget);
    }
    Ok(())
}

/// Buy the card in a market slot and refill it.
pub fn buy_card(
    state: &mut GameState,
    seat: PlayerId,
    slot: usize,
    rng: &mut dyn RandomSource,
) -> Result<(), RulesError> {
    let card = check_buy(state, seat, slot)?;
    let cost = price(state, seat, card)?;
    charge(state, seat, cost)?;
    state.market.take(slot)?;
    acquire_card(state, seat, card, rng);
    state.market.refill();
    tracing::debug!(%seat, %card, cost, "card bought");
    Ok(())
}

/// Can `seat` pay to sweep the market?
pub fn check_sweep(state: &GameState, seat: PlayerId) -> Result<(), IllegalAction> {
    if state.monster(seat).energy < state.config.sweep_cost {
        return Err(IllegalAction::CannotAfford);
    }
    Ok(())
}

/// Send the face-up cards to the bottom of the pile and deal new ones.
pub fn sweep(state: &mut GameState, seat: PlayerId) -> Result<(), RulesError> {
    let cost = state.config.sweep_cost;
    charge(state, seat, cost)?;
    state.market.sweep();
    let line = format!("{} sweeps the market", state.name(seat));
    state.log(line);
    Ok(())
}

/// Made in a Lab: what the top card is and whether `seat` can buy it.
pub fn check_buy_from_pile(state: &GameState, seat: PlayerId) -> Result<CardId, IllegalAction> {
    find_ability(state, seat, |a| matches!(a, Ability::PileAccess))
        .ok_or(IllegalAction::MissingAbility)?;
    let card = state.market.peek_top().ok_or(IllegalAction::PileEmpty)?;
    price(state, seat, card)?;
    Ok(card)
}

/// Buy the top card of the pile.
pub fn buy_from_pile(
    state: &mut GameState,
    seat: PlayerId,
    rng: &mut dyn RandomSource,
) -> Result<(), RulesError> {
    let card = check_buy_from_pile(state, seat)?;
    let cost = price(state, seat, card)?;
    charge(state, seat, cost)?;
    state.market.draw_top().ok_or(IllegalAction::PileEmpty)?;
    acquire_card(state, seat, card, rng);
    Ok(())
}

/// The top card of the pile, for a seat allowed to look at it.
#[must_use]
pub fn peek_pile(state: &GameState, seat: PlayerId) -> Option<CardId> {
    find_ability(state, seat, |a| matches!(a, Ability::PileAccess))?;
    state.market.peek_top()
}

/// Parasitic Tentacles: locate the seller's card and price it.
pub fn check_buy_from_monster(
    state: &GameState,
    seat: PlayerId,
    seller: PlayerId,
    card: CardId,
) -> Result<usize, IllegalAction> {
    find_ability(state, seat, |a| matches!(a, Ability::Tentacles))
        .ok_or(IllegalAction::MissingAbility)?;
    if seller == seat || !state.is_alive(seller) {
        return Err(IllegalAction::InvalidTarget);
    }
    let index = state
        .card_index(seller, card)
        .ok_or(IllegalAction::CardNotOwned)?;
    price(state, seat, card)?;
    Ok(index)
}

/// Take a keep card from another monster, paying its cost to the seller.
pub fn buy_from_monster(
    state: &mut GameState,
    seat: PlayerId,
    seller: PlayerId,
    card: CardId,
) -> Result<(), RulesError> {
    let index = check_buy_from_monster(state, seat, seller, card)?;
    let cost = price(state, seat, card)?;
    charge(state, seat, cost)?;
    state.monster_mut(seller).energy += cost;

    let mut owned = state
        .discard_card(seller, index)
        .ok_or_else(|| RulesError::invariant("seller card vanished"))?;
    owned.copy_of = None;
    clamp_health(state, seller);

    let bonus = sum_effects(state, seat, |e| match e {
        Effect::VictoryPointsOnPurchase(n) => Some(*n),
        _ => None,
    });
    state.monster_mut(seat).victory_points += bonus;
    state.collections[seat].push_back(owned);

    let name = card_definition(card).map_or("a card", |def| def.name);
    let line = format!(
        "{} takes {name} from {} for {cost} energy",
        state.name(seat),
        state.name(seller)
    );
    state.log(line);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardCatalog, OwnedCard};
    use crate::core::{GameRng, RulesConfig};
    use crate::market::Market;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn id(name: &str) -> CardId {
        CardCatalog::standard().by_name(name).unwrap().id
    }

    fn state(pile: &[&str]) -> GameState {
        let names = vec!["M0".to_string(), "M1".to_string()];
        let pile: Vec<_> = pile.iter().map(|n| id(n)).collect();
        GameState::new(RulesConfig::default(), &names, Market::new(pile))
    }

    #[test]
    fn test_buy_deducts_and_refills() {
        let mut state = state(&["Corner Store", "Energize", "Heal", "Skyscraper"]);
        state.monster_mut(P0).energy = 5;

        buy_card(&mut state, P0, 0, &mut GameRng::new(1)).unwrap();

        assert_eq!(state.monster(P0).energy, 2);
        assert_eq!(state.monster(P0).victory_points, 1);
        assert_eq!(state.market.slot(0), Ok(Some(id("Skyscraper"))));
        assert_eq!(state.market.pile_len(), 0);
    }

    #[test]
    fn test_cannot_afford() {
        let mut state = state(&["Energize", "Heal", "Skyscraper"]);
        state.monster_mut(P0).energy = 7;

        assert_eq!(check_buy(&state, P0, 0), Err(IllegalAction::CannotAfford));
        assert!(buy_card(&mut state, P0, 0, &mut GameRng::new(1)).is_err());
    }

    #[test]
    fn test_discount_applies() {
        let mut state = state(&["Energize", "Heal", "Skyscraper"]);
        state.collections[P0].push_back(OwnedCard::new(id("Alien Metabolism")));
        state.monster_mut(P0).energy = 7;

        buy_card(&mut state, P0, 0, &mut GameRng::new(1)).unwrap();
        assert_eq!(state.monster(P0).energy, 9);
    }

    #[test]
    fn test_empty_slot() {
        let mut state = state(&["Heal"]);
        state.monster_mut(P0).energy = 9;

        assert_eq!(check_buy(&state, P0, 1), Err(IllegalAction::EmptySlot));
        assert_eq!(check_buy(&state, P0, 3), Err(IllegalAction::SlotOutOfRange));
    }

    #[test]
    fn test_sweep_costs_two() {
        let mut state = state(&["Heal", "Energize", "Skyscraper", "Tanks"]);
        assert_eq!(check_sweep(&state, P0), Err(IllegalAction::CannotAfford));

        state.monster_mut(P0).energy = 2;
        sweep(&mut state, P0).unwrap();
        assert_eq!(state.monster(P0).energy, 0);
        assert_eq!(state.market.slot(0), Ok(Some(id("Tanks"))));
    }

    #[test]
    fn test_made_in_a_lab() {
        let mut state = state(&["Heal", "Energize", "Skyscraper", "Corner Store"]);
        assert_eq!(peek_pile(&state, P0), None);

        state.collections[P0].push_back(OwnedCard::new(id("Made in a Lab")));
        state.monster_mut(P0).energy = 3;
        assert_eq!(peek_pile(&state, P0), Some(id("Corner Store")));

        buy_from_pile(&mut state, P0, &mut GameRng::new(1)).unwrap();
        assert_eq!(state.monster(P0).victory_points, 1);
        assert_eq!(check_buy_from_pile(&state, P0), Err(IllegalAction::PileEmpty));
    }

    #[test]
    fn test_opportunist_needs_fresh_card() {
        let mut state = state(&["Heal", "Energize", "Skyscraper", "Corner Store"]);
        assert_eq!(check_opportunist(&state, P1, 0), Err(IllegalAction::NotYourTurn));

        state.collections[P1].push_back(OwnedCard::new(id("Opportunist")));
        assert_eq!(check_opportunist(&state, P1, 0), Ok(()));

        state.market.clear_fresh();
        assert_eq!(check_opportunist(&state, P1, 0), Err(IllegalAction::InvalidTarget));
    }

    #[test]
    fn test_tentacles_pays_seller() {
        let mut state = state(&[]);
        state.collections[P0].push_back(OwnedCard::new(id("Parasitic Tentacles")));
        state.collections[P1].push_back(OwnedCard::new(id("Even Bigger")));
        state.monster_mut(P1).health = 12;
        state.monster_mut(P0).energy = 4;

        buy_from_monster(&mut state, P0, P1, id("Even Bigger")).unwrap();

        assert!(state.owns(P0, id("Even Bigger")));
        assert!(!state.owns(P1, id("Even Bigger")));
        assert_eq!(state.monster(P1).energy, 4);
        assert_eq!(state.monster(P1).health, 10);
        assert_eq!(state.monster(P0).energy, 0);
    }

    #[test]
    fn test_tentacles_rejects_unowned() {
        let mut state = state(&[]);
        state.collections[P0].push_back(OwnedCard::new(id("Parasitic Tentacles")));
        state.monster_mut(P0).energy = 9;

        assert_eq!(
            check_buy_from_monster(&state, P0, P1, id("Jets")),
            Err(IllegalAction::CardNotOwned)
        );
        assert_eq!(
            check_buy_from_monster(&state, P0, P0, id("Parasitic Tentacles")),
            Err(IllegalAction::InvalidTarget)
        );
    }
}
