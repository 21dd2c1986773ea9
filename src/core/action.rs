//! Action representation.
//!
//! An [`Action`] is everything a seat can ask the engine to do. The host
//! forwards actions on behalf of connected seats; the engine validates each
//! one against the phase, the acting seat and the seat's cards.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::CardId;
use crate::dice::DieFace;

/// A move submitted by a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    // === Base turn ===
    /// Reroll every unheld die.
    Roll,

    /// Flip the held flag of one die.
    ToggleHold { die: usize },

    /// Stop rolling and resolve the dice now.
    LockIn,

    /// The attacked Tokyo occupant leaves (`true`) or stays (`false`).
    DecideYield { yield_tokyo: bool },

    /// Buy the card in a market slot.
    BuyCard { slot: usize },

    /// Pay to replace all three market cards.
    SweepMarket,

    /// Finish the turn.
    EndTurn,

    // === Card abilities ===
    /// Telepath: pay for one more reroll.
    BuyReroll,

    /// Smoke Cloud: spend a charge for one more reroll.
    UseSmokeCloud,

    /// Stretchy: pay to turn a die to any face.
    SetDie { die: usize, face: DieFace },

    /// Herd Culler: turn a die to ①, once per turn.
    CullDie { die: usize },

    /// Plot Twist: turn a die to any face, then discard the card.
    PlotTwist { die: usize, face: DieFace },

    /// Psychic Probe: reroll one of the active monster's dice.
    PsychicProbe { die: usize },

    /// Rapid Healing: pay to heal 1.
    RapidHeal,

    /// Wings: pay to ignore damage for the rest of the turn.
    ActivateWings,

    /// Healing Ray: spend unused hearts on another monster.
    HealingRay { target: PlayerId, amount: u32 },

    /// Metamorph: discard an owned card for its listed cost.
    SellCard { card: CardId },

    /// Mimic: copy a card another monster owns.
    CopyCard { card: CardId },

    /// Monster Batteries: move energy from the reserve onto the card.
    ChargeBatteries { amount: u32 },

    /// Made in a Lab: buy the top card of the pile.
    BuyFromPile,

    /// Parasitic Tentacles: buy a card another monster owns.
    BuyFromMonster { seller: PlayerId, card: CardId },
}

impl Action {
    /// Short name for logs and diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::Roll => "roll",
            Action::ToggleHold { .. } => "toggle_hold",
            Action::LockIn => "lock_in",
            Action::DecideYield { .. } => "decide_yield",
            Action::BuyCard { .. } => "buy_card",
            Action::SweepMarket => "sweep_market",
            Action::EndTurn => "end_turn",
            Action::BuyReroll => "buy_reroll",
            Action::UseSmokeCloud => "use_smoke_cloud",
            Action::SetDie { .. } => "set_die",
            Action::CullDie { .. } => "cull_die",
            Action::PlotTwist { .. } => "plot_twist",
            Action::PsychicProbe { .. } => "psychic_probe",
            Action::RapidHeal => "rapid_heal",
            Action::ActivateWings => "activate_wings",
            Action::HealingRay { .. } => "healing_ray",
            Action::SellCard { .. } => "sell_card",
            Action::CopyCard { .. } => "copy_card",
            Action::ChargeBatteries { .. } => "charge_batteries",
            Action::BuyFromPile => "buy_from_pile",
            Action::BuyFromMonster { .. } => "buy_from_monster",
        }
    }
}

/// A committed action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The seat that took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_equality() {
        assert_eq!(Action::ToggleHold { die: 2 }, Action::ToggleHold { die: 2 });
        assert_ne!(Action::ToggleHold { die: 2 }, Action::ToggleHold { die: 3 });
        assert_ne!(Action::Roll, Action::LockIn);
    }

    #[test]
    fn test_action_names() {
        assert_eq!(Action::DecideYield { yield_tokyo: true }.name(), "decide_yield");
        assert_eq!(Action::BuyCard { slot: 0 }.name(), "buy_card");
    }

    #[test]
    fn test_action_record_serialization() {
        let record = ActionRecord::new(
            PlayerId::new(1),
            Action::SetDie { die: 4, face: DieFace::Claw },
            2,
            3,
        );

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
