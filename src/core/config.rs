//! Rules configuration.
//!
//! Every numeric constant of the base rules lives in [`RulesConfig`] so that
//! hosts can run variants without touching the engine. Defaults reproduce
//! the standard game.

use serde::{Deserialize, Serialize};

use super::error::RulesError;

/// Numeric rule constants and capability switches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Starting and base maximum health.
    pub max_health: u32,

    /// Victory points needed to win.
    pub victory_points_to_win: u32,

    /// Dice rolled per turn before card modifiers.
    pub dice_count: usize,

    /// Rerolls per turn before card modifiers.
    pub base_rerolls: u32,

    /// Energy price of sweeping the market.
    pub sweep_cost: u32,

    /// Victory points for entering an empty Tokyo.
    pub tokyo_entry_bonus: u32,

    /// Victory points for starting a turn in Tokyo.
    pub tokyo_start_bonus: u32,

    /// Whether a Mimic copy grants the copied card's abilities.
    pub mimic_grants_abilities: bool,

    /// Whether a Mimic copy lapses while no other living monster owns the
    /// copied card (e.g. after it was taken with Parasitic Tentacles).
    pub mimic_requires_source: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_health: 10,
            victory_points_to_win: 20,
            dice_count: 6,
            base_rerolls: 2,
            sweep_cost: 2,
            tokyo_entry_bonus: 1,
            tokyo_start_bonus: 2,
            mimic_grants_abilities: true,
            mimic_requires_source: true,
        }
    }
}

impl RulesConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        serde_json::from_str(json).map_err(|e| RulesError::Config(e.to_string()))
    }

    /// Set victory points needed to win.
    #[must_use]
    pub fn with_victory_points_to_win(mut self, vp: u32) -> Self {
        self.victory_points_to_win = vp;
        self
    }

    /// Set starting/base maximum health.
    #[must_use]
    pub fn with_max_health(mut self, health: u32) -> Self {
        self.max_health = health;
        self
    }

    /// Configure how Mimic composes with other cards.
    #[must_use]
    pub fn with_mimic(mut self, grants_abilities: bool, requires_source: bool) -> Self {
        self.mimic_grants_abilities = grants_abilities;
        self.mimic_requires_source = requires_source;
        self
    }
}
