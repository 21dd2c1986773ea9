//! Passive queries over a seat's collection.
//!
//! Every rule that asks "does this monster have a card that..." goes through
//! [`active_effects`], which also decides what a Mimic copy contributes.

use smallvec::SmallVec;

use crate::cards::{card_definition, Ability, CardId, Effect};
use crate::core::{GameState, PlayerId};

/// Effects a seat currently benefits from, paired with the collection index
/// of the card providing each one.
pub type ActiveEffects = SmallVec<[(usize, Effect); 16]>;

/// Collect the effects of every card a seat owns.
///
/// A Mimic contributes its own ability plus the copied card's effects, while
/// the copy is valid. Copies never chain through another Mimic.
#[must_use]
pub fn active_effects(state: &GameState, seat: PlayerId) -> ActiveEffects {
    let mut out = ActiveEffects::new();
    for (index, owned) in state.collection(seat).iter().enumerate() {
        let Some(def) = card_definition(owned.id) else {
            continue;
        };
        out.extend(def.effects.iter().map(|e| (index, *e)));

        if let Some(target) = owned.copy_of {
            if copy_is_active(state, seat, target) {
                let grants_abilities = state.config.mimic_grants_abilities;
                if let Some(copied) = card_definition(target) {
                    out.extend(
                        copied
                            .effects
                            .iter()
                            .filter(|e| grants_abilities || e.ability().is_none())
                            .map(|e| (index, *e)),
                    );
                }
            }
        }
    }
    out
}

/// Does a Mimic copy of `target` held by `seat` currently apply?
#[must_use]
pub fn copy_is_active(state: &GameState, seat: PlayerId, target: CardId) -> bool {
    if is_mimic(target) {
        return false;
    }
    !state.config.mimic_requires_source
        || state
            .living_others(seat)
            .into_iter()
            .any(|other| state.owns(other, target))
}

/// True for cards that copy other cards.
#[must_use]
pub fn is_mimic(card: CardId) -> bool {
    card_definition(card).is_some_and(|def| {
        def.effects
            .iter()
            .any(|e| matches!(e, Effect::Ability(Ability::Mimic { .. })))
    })
}

/// Sum a numeric parameter across a seat's effects.
pub fn sum_effects(
    state: &GameState,
    seat: PlayerId,
    pick: impl Fn(&Effect) -> Option<u32>,
) -> u32 {
    active_effects(state, seat)
        .iter()
        .filter_map(|(_, e)| pick(e))
        .sum()
}

/// Does any of a seat's effects match?
pub fn has_effect(state: &GameState, seat: PlayerId, test: impl Fn(&Effect) -> bool) -> bool {
    active_effects(state, seat).iter().any(|(_, e)| test(e))
}

/// Find an activated ability, returning the providing card's index.
pub fn find_ability(
    state: &GameState,
    seat: PlayerId,
    test: impl Fn(&Ability) -> bool,
) -> Option<(usize, Ability)> {
    active_effects(state, seat)
        .iter()
        .filter_map(|(i, e)| e.ability().map(|a| (*i, a)))
        .find(|(_, a)| test(a))
}

/// Current maximum health: the base plus every max-health bonus.
#[must_use]
pub fn max_health(state: &GameState, seat: PlayerId) -> u32 {
    state.config.max_health
        + sum_effects(state, seat, |e| match e {
            Effect::MaxHealth(n) => Some(*n),
            _ => None,
        })
}

/// Energy discount on purchases.
#[must_use]
pub fn discount(state: &GameState, seat: PlayerId) -> u32 {
    sum_effects(state, seat, |e| match e {
        Effect::Discount(n) => Some(*n),
        _ => None,
    })
}

/// What a card costs this seat.
#[must_use]
pub fn effective_cost(state: &GameState, seat: PlayerId, card: CardId) -> Option<u32> {
    card_definition(card).map(|def| def.cost.saturating_sub(discount(state, seat)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardCatalog, OwnedCard};
    use crate::core::RulesConfig;
    use crate::market::Market;

    fn state(config: RulesConfig) -> GameState {
        let names = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        GameState::new(config, &names, Market::new(Vec::new()))
    }

    fn id(name: &str) -> CardId {
        CardCatalog::standard().by_name(name).unwrap().id
    }

    fn give(state: &mut GameState, seat: u8, card: OwnedCard) {
        state.collections[PlayerId::new(seat)].push_back(card);
    }

    #[test]
    fn test_max_health_includes_bonus() {
        let mut state = state(RulesConfig::default());
        assert_eq!(max_health(&state, PlayerId::new(0)), 10);

        give(&mut state, 0, OwnedCard::new(id("Even Bigger")));
        assert_eq!(max_health(&state, PlayerId::new(0)), 12);
    }

    #[test]
    fn test_discount_floors_cost_at_zero() {
        let mut state = state(RulesConfig::default());
        give(&mut state, 0, OwnedCard::new(id("Alien Metabolism")));

        assert_eq!(effective_cost(&state, PlayerId::new(0), id("Energize")), Some(7));
        assert_eq!(effective_cost(&state, PlayerId::new(0), id("Made in a Lab")), Some(1));
        assert_eq!(effective_cost(&state, PlayerId::new(1), id("Made in a Lab")), Some(2));
    }

    #[test]
    fn test_mimic_copies_passives() {
        let mut state = state(RulesConfig::default());
        give(&mut state, 1, OwnedCard::new(id("Armor Plating")));
        let mut mimic = OwnedCard::new(id("Mimic"));
        mimic.copy_of = Some(id("Armor Plating"));
        give(&mut state, 0, mimic);

        assert!(has_effect(&state, PlayerId::new(0), |e| matches!(e, Effect::DamageReduction(1))));
    }

    #[test]
    fn test_mimic_lapses_without_source() {
        let mut state = state(RulesConfig::default());
        let mut mimic = OwnedCard::new(id("Mimic"));
        mimic.copy_of = Some(id("Armor Plating"));
        give(&mut state, 0, mimic);

        assert!(!has_effect(&state, PlayerId::new(0), |e| matches!(e, Effect::DamageReduction(_))));

        let mut relaxed = state.clone();
        relaxed.config = RulesConfig::default().with_mimic(true, false);
        assert!(has_effect(&relaxed, PlayerId::new(0), |e| matches!(e, Effect::DamageReduction(_))));
    }

    #[test]
    fn test_mimic_ability_switch() {
        let mut state = state(RulesConfig::default().with_mimic(false, true));
        give(&mut state, 1, OwnedCard::new(id("Telepath")));
        let mut mimic = OwnedCard::new(id("Mimic"));
        mimic.copy_of = Some(id("Telepath"));
        give(&mut state, 0, mimic);

        let seat = PlayerId::new(0);
        assert!(find_ability(&state, seat, |a| matches!(a, Ability::PaidReroll { .. })).is_none());

        state.config.mimic_grants_abilities = true;
        assert_eq!(
            find_ability(&state, seat, |a| matches!(a, Ability::PaidReroll { .. })),
            Some((0, Ability::PaidReroll { cost: 1 }))
        );
    }

    #[test]
    fn test_mimic_never_chains() {
        let mut state = state(RulesConfig::default().with_mimic(true, false));
        let mut mimic = OwnedCard::new(id("Mimic"));
        mimic.copy_of = Some(id("Mimic"));
        give(&mut state, 0, mimic);

        let effects = active_effects(&state, PlayerId::new(0));
        assert_eq!(effects.len(), 1);
    }
}
