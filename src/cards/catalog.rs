//! The card catalog.
//!
//! All 64 card definitions, keyed by id. The table is static and read-only;
//! [`CardCatalog`] adds lookup helpers on top of it.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId, CardKind};
use super::effect::{Ability, AttackCondition, Combo, Effect};
use crate::dice::DieFace;

/// Number of distinct cards.
pub const CARD_COUNT: usize = 64;

static CARDS: [CardDefinition; CARD_COUNT] = [
    CardDefinition {
        id: CardId::new(1),
        name: "Acid Attack",
        cost: 6,
        kind: CardKind::Keep,
        text: "Deal 1 extra damage each turn, even without attacking.",
        effects: &[Effect::BonusDamage { amount: 1, when: AttackCondition::Always }],
    },
    CardDefinition {
        id: CardId::new(2),
        name: "Alien Metabolism",
        cost: 3,
        kind: CardKind::Keep,
        text: "Buying cards costs 1 less energy.",
        effects: &[Effect::Discount(1)],
    },
    CardDefinition {
        id: CardId::new(3),
        name: "Alpha Monster",
        cost: 5,
        kind: CardKind::Keep,
        text: "Gain 1 VP whenever you deal damage.",
        effects: &[Effect::VictoryPointsOnDamage(1)],
    },
    CardDefinition {
        id: CardId::new(4),
        name: "Apartment Building",
        cost: 5,
        kind: CardKind::Discard,
        text: "+3 VP.",
        effects: &[Effect::GainVictoryPoints(3)],
    },
    CardDefinition {
        id: CardId::new(5),
        name: "Armor Plating",
        cost: 4,
        kind: CardKind::Keep,
        text: "Ignore 1 point of damage each time you are hit.",
        effects: &[Effect::DamageReduction(1)],
    },
    CardDefinition {
        id: CardId::new(6),
        name: "Background Dweller",
        cost: 4,
        kind: CardKind::Keep,
        text: "You can always reroll any [3] you have.",
        effects: &[Effect::FreeRerollOf(DieFace::Three)],
    },
    CardDefinition {
        id: CardId::new(7),
        name: "Burrowing",
        cost: 5,
        kind: CardKind::Keep,
        text: "Deal 1 extra damage to Tokyo. Deal 1 damage when yielding Tokyo.",
        effects: &[Effect::BonusDamage { amount: 1, when: AttackCondition::AgainstTokyo }, Effect::YieldRetaliation(1)],
    },
    CardDefinition {
        id: CardId::new(8),
        name: "Camouflage",
        cost: 3,
        kind: CardKind::Keep,
        text: "Roll a die for each damage point taken. On [heart] ignore that damage.",
        effects: &[Effect::Camouflage],
    },
    CardDefinition {
        id: CardId::new(9),
        name: "Commuter Train",
        cost: 4,
        kind: CardKind::Discard,
        text: "+2 VP.",
        effects: &[Effect::GainVictoryPoints(2)],
    },
    CardDefinition {
        id: CardId::new(10),
        name: "Complete Destruction",
        cost: 3,
        kind: CardKind::Keep,
        text: "If you roll [1][2][3][heart][claw][lightning] gain 9 VP in addition to regular results.",
        effects: &[Effect::ComboReward { combo: Combo::AllOf(&DieFace::ALL), victory_points: 9, damage: 0 }],
    },
    CardDefinition {
        id: CardId::new(11),
        name: "Corner Store",
        cost: 3,
        kind: CardKind::Discard,
        text: "+1 VP.",
        effects: &[Effect::GainVictoryPoints(1)],
    },
    CardDefinition {
        id: CardId::new(12),
        name: "Dedicated News Team",
        cost: 3,
        kind: CardKind::Keep,
        text: "Gain 1 VP whenever you buy a card.",
        effects: &[Effect::VictoryPointsOnPurchase(1)],
    },
    CardDefinition {
        id: CardId::new(13),
        name: "Drop from High Altitude",
        cost: 5,
        kind: CardKind::Discard,
        text: "+2 VP and take control of Tokyo if you don't already.",
        effects: &[Effect::GainVictoryPoints(2), Effect::SeizeTokyo],
    },
    CardDefinition {
        id: CardId::new(14),
        name: "Eater of the Dead",
        cost: 4,
        kind: CardKind::Keep,
        text: "Gain 3 VP every time a monster is eliminated.",
        effects: &[Effect::VictoryPointsOnElimination(3)],
    },
    CardDefinition {
        id: CardId::new(15),
        name: "Energize",
        cost: 8,
        kind: CardKind::Discard,
        text: "+9 energy.",
        effects: &[Effect::GainEnergy(9)],
    },
    CardDefinition {
        id: CardId::new(16),
        name: "Energy Hoarder",
        cost: 3,
        kind: CardKind::Keep,
        text: "Gain 1 VP for every 6 energy you have at the end of your turn.",
        effects: &[Effect::VictoryPointsPerEnergy(6)],
    },
    CardDefinition {
        id: CardId::new(17),
        name: "Evacuation Orders",
        cost: 7,
        kind: CardKind::Discard,
        text: "All other monsters lose 5 VP.",
        effects: &[Effect::OthersLoseVictoryPoints(5)],
    },
    CardDefinition {
        id: CardId::new(18),
        name: "Even Bigger",
        cost: 4,
        kind: CardKind::Keep,
        text: "+2 maximum HP. Gain 2 HP when you get this card.",
        effects: &[Effect::MaxHealth(2), Effect::Heal(2)],
    },
    CardDefinition {
        id: CardId::new(19),
        name: "Extra Head",
        cost: 7,
        kind: CardKind::Keep,
        text: "You roll 1 extra die each turn.",
        effects: &[Effect::ExtraDie(1)],
    },
    CardDefinition {
        id: CardId::new(20),
        name: "Fire Blast",
        cost: 3,
        kind: CardKind::Discard,
        text: "Deal 2 damage to all other monsters.",
        effects: &[Effect::DamageOthers(2)],
    },
    CardDefinition {
        id: CardId::new(21),
        name: "Fire Breathing",
        cost: 4,
        kind: CardKind::Keep,
        text: "Your neighbours take 1 extra damage when you deal damage.",
        effects: &[Effect::NeighbourSplash(1)],
    },
    CardDefinition {
        id: CardId::new(22),
        name: "Freeze Time",
        cost: 5,
        kind: CardKind::Keep,
        text: "On a turn you score [1][1][1], take another turn with one less die.",
        effects: &[Effect::ComboExtraTurn { combo: Combo::Triple(DieFace::One), dice_penalty: 1 }],
    },
    CardDefinition {
        id: CardId::new(23),
        name: "Frenzy",
        cost: 7,
        kind: CardKind::Discard,
        text: "Take another turn immediately after this one.",
        effects: &[Effect::ExtraTurn],
    },
    CardDefinition {
        id: CardId::new(24),
        name: "Friend of Children",
        cost: 3,
        kind: CardKind::Keep,
        text: "Gain 1 extra energy whenever you gain any energy.",
        effects: &[Effect::EnergyGainBonus(1)],
    },
    CardDefinition {
        id: CardId::new(25),
        name: "Gas Refinery",
        cost: 6,
        kind: CardKind::Discard,
        text: "+2 VP and deal 3 damage to all other monsters.",
        effects: &[Effect::GainVictoryPoints(2), Effect::DamageOthers(3)],
    },
    CardDefinition {
        id: CardId::new(26),
        name: "Giant Brain",
        cost: 5,
        kind: CardKind::Keep,
        text: "You get 1 extra reroll each turn.",
        effects: &[Effect::ExtraReroll(1)],
    },
    CardDefinition {
        id: CardId::new(27),
        name: "Gourmet",
        cost: 4,
        kind: CardKind::Keep,
        text: "When scoring [1][1][1] gain 2 extra VP.",
        effects: &[Effect::ComboReward { combo: Combo::Triple(DieFace::One), victory_points: 2, damage: 0 }],
    },
    CardDefinition {
        id: CardId::new(28),
        name: "Heal",
        cost: 3,
        kind: CardKind::Discard,
        text: "Heal 2 HP.",
        effects: &[Effect::Heal(2)],
    },
    CardDefinition {
        id: CardId::new(29),
        name: "Healing Ray",
        cost: 4,
        kind: CardKind::Keep,
        text: "Heal other monsters with [heart]. They pay you 2 energy per HP healed.",
        effects: &[Effect::Ability(Ability::HealingRay { price_per_point: 2 })],
    },
    CardDefinition {
        id: CardId::new(30),
        name: "Herbivore",
        cost: 5,
        kind: CardKind::Keep,
        text: "Gain 1 VP on your turn if you don't damage anyone.",
        effects: &[Effect::VictoryPointsWithoutDamage(1)],
    },
    CardDefinition {
        id: CardId::new(31),
        name: "Herd Culler",
        cost: 3,
        kind: CardKind::Keep,
        text: "You can change one of your dice to a [1] each turn.",
        effects: &[Effect::Ability(Ability::Cull { face: DieFace::One })],
    },
    CardDefinition {
        id: CardId::new(32),
        name: "High Altitude Bombing",
        cost: 4,
        kind: CardKind::Discard,
        text: "All monsters (including you) take 3 damage.",
        effects: &[Effect::DamageEveryone(3)],
    },
    CardDefinition {
        id: CardId::new(33),
        name: "It Has a Child",
        cost: 7,
        kind: CardKind::Keep,
        text: "If eliminated, discard your cards and VP, heal to 10 HP and restart.",
        effects: &[Effect::Rebirth],
    },
    CardDefinition {
        id: CardId::new(34),
        name: "Jet Fighters",
        cost: 5,
        kind: CardKind::Discard,
        text: "+5 VP and take 4 damage.",
        effects: &[Effect::GainVictoryPoints(5), Effect::TakeDamage(4)],
    },
    CardDefinition {
        id: CardId::new(35),
        name: "Jets",
        cost: 5,
        kind: CardKind::Keep,
        text: "You suffer no damage when yielding Tokyo.",
        effects: &[Effect::SafeYield],
    },
    CardDefinition {
        id: CardId::new(36),
        name: "Made in a Lab",
        cost: 2,
        kind: CardKind::Keep,
        text: "When purchasing cards, peek at and optionally buy the top deck card.",
        effects: &[Effect::Ability(Ability::PileAccess)],
    },
    CardDefinition {
        id: CardId::new(37),
        name: "Metamorph",
        cost: 3,
        kind: CardKind::Keep,
        text: "Discard any of your KEEP cards at end of turn to recover their energy cost.",
        effects: &[Effect::Ability(Ability::Metamorph)],
    },
    CardDefinition {
        id: CardId::new(38),
        name: "Mimic",
        cost: 8,
        kind: CardKind::Keep,
        text: "Copy a card any monster has. Spend 1 energy to change what you are copying.",
        effects: &[Effect::Ability(Ability::Mimic { change_cost: 1 })],
    },
    CardDefinition {
        id: CardId::new(39),
        name: "Monster Batteries",
        cost: 2,
        kind: CardKind::Keep,
        text: "Load with energy from your reserve. Take 2 energy per turn. Discard when empty.",
        effects: &[Effect::Ability(Ability::Batteries { per_turn: 2 })],
    },
    CardDefinition {
        id: CardId::new(40),
        name: "National Guard",
        cost: 3,
        kind: CardKind::Discard,
        text: "+2 VP and take 2 damage.",
        effects: &[Effect::GainVictoryPoints(2), Effect::TakeDamage(2)],
    },
    CardDefinition {
        id: CardId::new(41),
        name: "Nova Breath",
        cost: 7,
        kind: CardKind::Keep,
        text: "Your attacks damage all other monsters.",
        effects: &[Effect::HitAllOthers],
    },
    CardDefinition {
        id: CardId::new(42),
        name: "Nuclear Power Plant",
        cost: 6,
        kind: CardKind::Discard,
        text: "+2 VP and heal 3 HP.",
        effects: &[Effect::GainVictoryPoints(2), Effect::Heal(3)],
    },
    CardDefinition {
        id: CardId::new(43),
        name: "Omnivore",
        cost: 4,
        kind: CardKind::Keep,
        text: "Once per turn score [1][2][3] for 2 VP. Dice can still be used in other combos.",
        effects: &[Effect::ComboReward { combo: Combo::AllOf(&[DieFace::One, DieFace::Two, DieFace::Three]), victory_points: 2, damage: 0 }],
    },
    CardDefinition {
        id: CardId::new(44),
        name: "Opportunist",
        cost: 3,
        kind: CardKind::Keep,
        text: "Buy a newly revealed market card immediately when it is flipped.",
        effects: &[Effect::Ability(Ability::Opportunist)],
    },
    CardDefinition {
        id: CardId::new(45),
        name: "Parasitic Tentacles",
        cost: 4,
        kind: CardKind::Keep,
        text: "You can purchase KEEP cards from other monsters at their energy cost.",
        effects: &[Effect::Ability(Ability::Tentacles)],
    },
    CardDefinition {
        id: CardId::new(46),
        name: "Plot Twist",
        cost: 3,
        kind: CardKind::Keep,
        text: "Change one die to any result. Discard after use.",
        effects: &[Effect::Ability(Ability::PlotTwist)],
    },
    CardDefinition {
        id: CardId::new(47),
        name: "Poison Quills",
        cost: 3,
        kind: CardKind::Keep,
        text: "When you score [2][2][2] also deal 2 damage.",
        effects: &[Effect::ComboReward { combo: Combo::Triple(DieFace::Two), victory_points: 0, damage: 2 }],
    },
    CardDefinition {
        id: CardId::new(48),
        name: "Poison Spit",
        cost: 4,
        kind: CardKind::Keep,
        text: "Dealing damage gives targets a poison counter. They take 1 damage per counter at end of their turn.",
        effects: &[Effect::PoisonOnHit(1)],
    },
    CardDefinition {
        id: CardId::new(49),
        name: "Psychic Probe",
        cost: 3,
        kind: CardKind::Keep,
        text: "Reroll one die of each other monster once per turn. Discard if result is [heart].",
        effects: &[Effect::Ability(Ability::PsychicProbe)],
    },
    CardDefinition {
        id: CardId::new(50),
        name: "Rapid Healing",
        cost: 3,
        kind: CardKind::Keep,
        text: "Spend 2 energy at any time to heal 1 HP.",
        effects: &[Effect::Ability(Ability::RapidHeal { cost: 2, heal: 1 })],
    },
    CardDefinition {
        id: CardId::new(51),
        name: "Regeneration",
        cost: 4,
        kind: CardKind::Keep,
        text: "When you heal, heal 1 extra HP.",
        effects: &[Effect::HealBonus(1)],
    },
    CardDefinition {
        id: CardId::new(52),
        name: "Rooting for the Underdog",
        cost: 3,
        kind: CardKind::Keep,
        text: "Gain 1 VP at end of a turn when you have the fewest VP.",
        effects: &[Effect::UnderdogBonus(1)],
    },
    CardDefinition {
        id: CardId::new(53),
        name: "Shrink Ray",
        cost: 6,
        kind: CardKind::Keep,
        text: "Dealing damage gives targets a shrink counter. They roll 1 less die per counter.",
        effects: &[Effect::ShrinkOnHit(1)],
    },
    CardDefinition {
        id: CardId::new(54),
        name: "Skyscraper",
        cost: 6,
        kind: CardKind::Discard,
        text: "+4 VP.",
        effects: &[Effect::GainVictoryPoints(4)],
    },
    CardDefinition {
        id: CardId::new(55),
        name: "Smoke Cloud",
        cost: 4,
        kind: CardKind::Keep,
        text: "Has 3 charges. Spend a charge for an extra reroll. Discard when empty.",
        effects: &[Effect::Charges(3), Effect::Ability(Ability::ChargedReroll)],
    },
    CardDefinition {
        id: CardId::new(56),
        name: "Solar Powered",
        cost: 2,
        kind: CardKind::Keep,
        text: "Gain 1 energy at the end of your turn if you have none.",
        effects: &[Effect::EnergyWhenEmpty(1)],
    },
    CardDefinition {
        id: CardId::new(57),
        name: "Spiked Tail",
        cost: 5,
        kind: CardKind::Keep,
        text: "Deal 1 extra damage when you attack.",
        effects: &[Effect::BonusDamage { amount: 1, when: AttackCondition::WithClaws }],
    },
    CardDefinition {
        id: CardId::new(58),
        name: "Stretchy",
        cost: 3,
        kind: CardKind::Keep,
        text: "Spend 2 energy to change one of your dice to any result.",
        effects: &[Effect::Ability(Ability::Stretch { cost: 2 })],
    },
    CardDefinition {
        id: CardId::new(59),
        name: "Tanks",
        cost: 4,
        kind: CardKind::Discard,
        text: "+4 VP and take 3 damage.",
        effects: &[Effect::GainVictoryPoints(4), Effect::TakeDamage(3)],
    },
    CardDefinition {
        id: CardId::new(60),
        name: "Telepath",
        cost: 4,
        kind: CardKind::Keep,
        text: "Spend 1 energy for 1 extra reroll.",
        effects: &[Effect::Ability(Ability::PaidReroll { cost: 1 })],
    },
    CardDefinition {
        id: CardId::new(61),
        name: "Urbavore",
        cost: 4,
        kind: CardKind::Keep,
        text: "+1 VP when starting a turn in Tokyo. Deal 1 extra damage when attacking from Tokyo.",
        effects: &[Effect::TokyoStartBonus(1), Effect::BonusDamage { amount: 1, when: AttackCondition::FromTokyo }],
    },
    CardDefinition {
        id: CardId::new(62),
        name: "Vast Storm",
        cost: 6,
        kind: CardKind::Discard,
        text: "+2 VP. All other monsters lose half their energy (rounded down).",
        effects: &[Effect::GainVictoryPoints(2), Effect::OthersLoseHalfEnergy],
    },
    CardDefinition {
        id: CardId::new(63),
        name: "We're Only Making It Stronger",
        cost: 3,
        kind: CardKind::Keep,
        text: "When you lose 2+ HP in one hit, gain 1 energy.",
        effects: &[Effect::EnergyOnHeavyHit { threshold: 2, energy: 1 }],
    },
    CardDefinition {
        id: CardId::new(64),
        name: "Wings",
        cost: 6,
        kind: CardKind::Keep,
        text: "Spend 2 energy to negate all damage to you for one turn.",
        effects: &[Effect::Ability(Ability::Wings { cost: 2 })],
    },
];

/// Look up a definition in the static table.
#[must_use]
pub fn card_definition(id: CardId) -> Option<&'static CardDefinition> {
    let index = usize::try_from(id.raw()).ok()?.checked_sub(1)?;
    CARDS.get(index)
}

/// Read-only view of the card table with lookup helpers.
///
/// ## Example
///
/// ```
/// use tokyo_rules::cards::{CardCatalog, CardId};
///
/// let catalog = CardCatalog::standard();
/// assert_eq!(catalog.len(), 64);
/// assert_eq!(catalog.by_name("Giant Brain").map(|c| c.id), Some(CardId::new(26)));
/// ```
#[derive(Clone, Debug)]
pub struct CardCatalog {
    by_name: FxHashMap<&'static str, CardId>,
}

impl CardCatalog {
    /// The standard 64-card catalog.
    #[must_use]
    pub fn standard() -> Self {
        let by_name = CARDS.iter().map(|c| (c.name, c.id)).collect();
        Self { by_name }
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&'static CardDefinition> {
        card_definition(id)
    }

    /// Get a card definition by exact name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&'static CardDefinition> {
        self.by_name.get(name).copied().and_then(card_definition)
    }

    /// Check if a card ID is in the catalog.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        card_definition(id).is_some()
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        CARDS.len()
    }

    /// True when the catalog has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        CARDS.is_empty()
    }

    /// All card ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = CardId> {
        CARDS.iter().map(|c| c.id)
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &'static CardDefinition> {
        CARDS.iter()
    }

    /// Find cards by kind.
    pub fn find_by_kind(&self, kind: CardKind) -> impl Iterator<Item = &'static CardDefinition> {
        CARDS.iter().filter(move |c| c.kind == kind)
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &'static CardDefinition>
    where
        F: Fn(&CardDefinition) -> bool,
    {
        CARDS.iter().filter(move |c| predicate(c))
    }
}

impl Default for CardCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_dense_and_ordered() {
        for (i, card) in CARDS.iter().enumerate() {
            assert_eq!(card.id.raw() as usize, i + 1, "{} out of place", card.name);
        }
    }

    #[test]
    fn test_every_card_has_effects() {
        for card in CARDS.iter() {
            assert!(!card.effects.is_empty(), "{} has no effects", card.name);
        }
    }

    #[test]
    fn test_discard_cards_are_all_immediate() {
        let catalog = CardCatalog::standard();
        for card in catalog.find_by_kind(CardKind::Discard) {
            assert!(
                card.effects.iter().all(Effect::is_immediate),
                "{} has a lasting clause",
                card.name
            );
        }
    }

    #[test]
    fn test_lookup() {
        let catalog = CardCatalog::standard();

        assert_eq!(catalog.get(CardId::new(1)).unwrap().name, "Acid Attack");
        assert_eq!(catalog.get(CardId::new(64)).unwrap().name, "Wings");
        assert!(catalog.get(CardId::new(0)).is_none());
        assert!(catalog.get(CardId::new(65)).is_none());
        assert!(catalog.contains(CardId::new(33)));
    }

    #[test]
    fn test_kind_split() {
        let catalog = CardCatalog::standard();
        let discards = catalog.find_by_kind(CardKind::Discard).count();
        let keeps = catalog.find_by_kind(CardKind::Keep).count();
        assert_eq!(discards + keeps, CARD_COUNT);
        assert_eq!(discards, 17);
    }

    #[test]
    fn test_find_with_predicate() {
        let catalog = CardCatalog::standard();
        let cheap: Vec<_> = catalog.find(|c| c.cost <= 2).map(|c| c.name).collect();
        assert!(cheap.contains(&"Made in a Lab"));
        assert!(cheap.contains(&"Solar Powered"));
    }
}
