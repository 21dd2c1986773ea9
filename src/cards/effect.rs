//! The effect table.
//!
//! Every card is described by a small list of [`Effect`] values drawn from a
//! closed set of shapes: flat deltas, conditional rewards, area effects,
//! cost modifiers, resource grants, triggered reactions and activated
//! abilities. The dispatcher in [`crate::effects`] walks these lists; no
//! code branches on a card id.
//!
//! Immediate effects ([`Effect::is_immediate`]) run when the card is
//! acquired. For discard cards that is their whole rule; keep cards use them
//! for "when you get this card" clauses.

use serde::{Deserialize, Serialize};

use crate::dice::{DieFace, FaceCounts};

/// A dice pattern that a card rewards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Combo {
    /// At least three of one face.
    Triple(DieFace),
    /// Each listed face at least once.
    AllOf(&'static [DieFace]),
}

impl Combo {
    /// Does the hand contain this pattern?
    #[must_use]
    pub fn matches(&self, counts: &FaceCounts) -> bool {
        match self {
            Combo::Triple(face) => counts.has_triple(*face),
            Combo::AllOf(faces) => counts.contains_all(faces),
        }
    }
}

/// When a flat damage bonus applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackCondition {
    /// Every resolution, claws or not.
    Always,
    /// When at least one claw was rolled.
    WithClaws,
    /// With claws, while occupying Tokyo.
    FromTokyo,
    /// With claws, from outside against an occupied Tokyo.
    AgainstTokyo,
}

/// Abilities a seat triggers through an explicit action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ability {
    /// Pay energy for one more reroll.
    PaidReroll { cost: u32 },
    /// Spend a card charge for one more reroll.
    ChargedReroll,
    /// Pay energy to set a die to any face.
    Stretch { cost: u32 },
    /// Once per turn set a die to the given face.
    Cull { face: DieFace },
    /// Set a die to any face, then discard the card.
    PlotTwist,
    /// Reroll one die of another monster once per turn.
    PsychicProbe,
    /// Pay energy to heal.
    RapidHeal { cost: u32, heal: u32 },
    /// Pay energy to ignore damage until end of turn.
    Wings { cost: u32 },
    /// Heal others with unused hearts; they pay per point healed.
    HealingRay { price_per_point: u32 },
    /// Discard an owned card to regain its cost.
    Metamorph,
    /// Copy a card another monster owns.
    Mimic { change_cost: u32 },
    /// Store energy on the card and draw some back each turn.
    Batteries { per_turn: u32 },
    /// Buy the top card of the pile.
    PileAccess,
    /// Buy freshly revealed market cards out of turn.
    Opportunist,
    /// Buy keep cards from other monsters.
    Tentacles,
}

/// One rule clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Effect {
    // === Immediate ===
    GainVictoryPoints(u32),
    GainEnergy(u32),
    Heal(u32),
    TakeDamage(u32),
    DamageOthers(u32),
    DamageEveryone(u32),
    OthersLoseVictoryPoints(u32),
    OthersLoseHalfEnergy,
    SeizeTokyo,
    ExtraTurn,
    /// Charges loaded onto the card when acquired.
    Charges(u32),

    // === Passive: health ===
    MaxHealth(u32),

    // === Passive: resolution ===
    BonusDamage { amount: u32, when: AttackCondition },
    ComboReward { combo: Combo, victory_points: u32, damage: u32 },
    ComboExtraTurn { combo: Combo, dice_penalty: usize },
    EnergyGainBonus(u32),
    HealBonus(u32),
    VictoryPointsOnDamage(u32),
    VictoryPointsWithoutDamage(u32),
    TokyoStartBonus(u32),
    /// Attacks from outside Tokyo also hit every other monster.
    HitAllOthers,
    NeighbourSplash(u32),

    // === Passive: taking damage ===
    DamageReduction(u32),
    Camouflage,
    EnergyOnHeavyHit { threshold: u32, energy: u32 },
    SafeYield,
    YieldRetaliation(u32),
    PoisonOnHit(u32),
    ShrinkOnHit(u32),
    Rebirth,

    // === Passive: market ===
    Discount(u32),
    VictoryPointsOnPurchase(u32),

    // === Passive: dice ===
    ExtraReroll(u32),
    ExtraDie(u32),
    FreeRerollOf(DieFace),

    // === End of turn ===
    VictoryPointsPerEnergy(u32),
    EnergyWhenEmpty(u32),
    UnderdogBonus(u32),

    // === Triggered ===
    VictoryPointsOnElimination(u32),

    // === Activated ===
    Ability(Ability),
}

impl Effect {
    /// True for clauses that fire once, when the card is acquired.
    #[must_use]
    pub fn is_immediate(&self) -> bool {
        matches!(
            self,
            Effect::GainVictoryPoints(_)
                | Effect::GainEnergy(_)
                | Effect::Heal(_)
                | Effect::TakeDamage(_)
                | Effect::DamageOthers(_)
                | Effect::DamageEveryone(_)
                | Effect::OthersLoseVictoryPoints(_)
                | Effect::OthersLoseHalfEnergy
                | Effect::SeizeTokyo
                | Effect::ExtraTurn
                | Effect::Charges(_)
        )
    }

    /// The ability carried by this clause, if any.
    #[must_use]
    pub fn ability(&self) -> Option<Ability> {
        match self {
            Effect::Ability(a) => Some(*a),
            _ => None,
        }
    }
}
