//! Read-only view of the game handed to hosts and renderers.

use serde::{Deserialize, Serialize};

use super::error::RulesError;
use super::player::{Monster, PlayerId};
use super::state::{GameState, Phase, TokyoState};
use crate::cards::{CardId, OwnedCard};
use crate::dice::DieFace;
use crate::market::MARKET_SLOTS;
use crate::rules::GameResult;

/// Everything a client may see after an action.
///
/// The draw pile is reported by size only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub players: Vec<Monster>,
    /// Current maximum health per seat, including card bonuses.
    pub max_health: Vec<u32>,
    pub dice: Vec<DieFace>,
    pub held: Vec<bool>,
    pub rerolls_left: u32,
    pub tokyo: TokyoState,
    pub market: [Option<CardId>; MARKET_SLOTS],
    pub pile_size: usize,
    pub collections: Vec<Vec<OwnedCard>>,
    pub phase: Phase,
    pub active: PlayerId,
    pub turn_number: u32,
    pub log: Vec<String>,
    pub outcome: Option<GameResult>,
}

impl GameSnapshot {
    /// Capture the current state.
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        Self {
            players: state.monsters.values().cloned().collect(),
            max_health: state
                .monsters
                .player_ids()
                .map(|p| crate::effects::max_health(state, p))
                .collect(),
            dice: state.dice.faces().to_vec(),
            held: state.dice.held().to_vec(),
            rerolls_left: state.dice.rerolls_left(),
            tokyo: state.tokyo.clone(),
            market: *state.market.slots(),
            pile_size: state.market.pile_len(),
            collections: state
                .collections
                .values()
                .map(|c| c.iter().copied().collect())
                .collect(),
            phase: state.turn.phase,
            active: state.turn.active,
            turn_number: state.turn.turn_number,
            log: state.log.iter().cloned().collect(),
            outcome: state.outcome.clone(),
        }
    }

    /// Compact binary encoding for transport.
    pub fn encode(&self) -> Result<Vec<u8>, RulesError> {
        bincode::serialize(self).map_err(|e| RulesError::Codec(e.to_string()))
    }

    /// Inverse of [`GameSnapshot::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self, RulesError> {
        bincode::deserialize(bytes).map_err(|e| RulesError::Codec(e.to_string()))
    }

    /// The seat that must submit the yield decision, if one is pending.
    #[must_use]
    pub fn decider(&self) -> Option<PlayerId> {
        self.tokyo.decider
    }
}
