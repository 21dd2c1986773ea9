//! Game state: the aggregate every action mutates.
//!
//! ## GameState
//!
//! Complete game state:
//! - Monsters, one per seat
//! - Dice for the current turn
//! - Tokyo occupancy and any attack awaiting a yield decision
//! - Market and per-seat card collections
//! - Turn bookkeeping and the narrative log
//! - Committed action history and the outcome once decided
//!
//! Uses `im` persistent collections so the coordinator can work on a cheap
//! clone and commit only when an action succeeds.

use im::{HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::ActionRecord;
use super::config::RulesConfig;
use super::error::RulesError;
use super::player::{Monster, PlayerId, PlayerMap};
use crate::cards::{CardId, OwnedCard};
use crate::dice::DiceSet;
use crate::market::Market;
use crate::rules::GameResult;

/// Turn phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// The active monster may reroll, hold dice and lock in.
    Rolling,
    /// Dice have been scored; buying, abilities and ending the turn are open.
    Resolved,
    /// The Tokyo occupant must choose to stay or yield.
    AwaitingYieldDecision,
    /// An outcome exists; every action is rejected.
    GameOver,
}

/// Tokyo occupancy and the attack in flight against it.
///
/// `pending_damage > 0` implies `occupant`, `attacker` and `decider` are set,
/// `decider == occupant` and `occupant != attacker`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokyoState {
    /// Monster currently in Tokyo.
    pub occupant: Option<PlayerId>,

    /// Damage the occupant takes when deciding.
    pub pending_damage: u32,

    /// Monster whose roll produced the pending damage.
    pub attacker: Option<PlayerId>,

    /// The only seat allowed to submit the yield decision.
    pub decider: Option<PlayerId>,
}

impl TokyoState {
    /// Is an attack waiting for the occupant's decision?
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending_damage > 0
    }

    /// Drop any attack in flight.
    pub fn clear_pending(&mut self) {
        self.pending_damage = 0;
        self.attacker = None;
        self.decider = None;
    }
}

/// Bookkeeping for the turn in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Current phase.
    pub phase: Phase,

    /// Seat whose turn it is.
    pub active: PlayerId,

    /// Turn counter, starting at 1 for the first turn.
    pub turn_number: u32,

    /// Committed actions so far this turn.
    pub action_sequence: u32,

    /// Seats owed another turn straight after their next one ends.
    pub extra_turns: ImHashSet<PlayerId>,

    /// Dice removed from the next turn of the active monster.
    pub dice_penalty: usize,

    /// Hearts rolled this turn that did not heal.
    pub unspent_hearts: u32,

    /// Herd Culler was used this turn.
    pub cull_used: bool,

    /// Seats that already used Psychic Probe this turn.
    pub probed_by: ImHashSet<PlayerId>,

    /// Seats ignoring damage until the turn ends.
    pub wings: ImHashSet<PlayerId>,
}

impl TurnState {
    fn new() -> Self {
        Self {
            phase: Phase::Rolling,
            active: PlayerId::new(0),
            turn_number: 0,
            action_sequence: 0,
            extra_turns: ImHashSet::new(),
            dice_penalty: 0,
            unspent_hearts: 0,
            cull_used: false,
            probed_by: ImHashSet::new(),
            wings: ImHashSet::new(),
        }
    }

    /// Reset the per-turn flags for `active`. The dice penalty survives so
    /// the caller can apply it.
    pub fn reset_for(&mut self, active: PlayerId) {
        self.phase = Phase::Rolling;
        self.active = active;
        self.turn_number += 1;
        self.action_sequence = 0;
        self.unspent_hearts = 0;
        self.cull_used = false;
        self.probed_by = ImHashSet::new();
        self.wings = ImHashSet::new();
    }
}

/// Complete game state.
///
/// Owned exclusively by the host; the rules only ever see it for the length
/// of one action.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Rule constants for this game.
    pub config: RulesConfig,

    /// One monster per seat; eliminated monsters stay here.
    pub monsters: PlayerMap<Monster>,

    /// Dice of the current turn.
    pub dice: DiceSet,

    /// Tokyo occupancy.
    pub tokyo: TokyoState,

    /// Draw pile and face-up cards.
    pub market: Market,

    /// Keep cards per seat in purchase order.
    pub collections: PlayerMap<Vector<OwnedCard>>,

    /// Turn bookkeeping.
    pub turn: TurnState,

    /// Narrative lines for the current turn.
    pub log: Vector<String>,

    /// Set once the game is decided.
    pub outcome: Option<GameResult>,

    /// Every committed action.
    pub history: Vector<ActionRecord>,
}

impl GameState {
    /// Create a game with one monster per name and a dealt market.
    ///
    /// The first turn has not begun; [`crate::rules::GameBuilder`] starts it.
    #[must_use]
    pub fn new(config: RulesConfig, names: &[String], market: Market) -> Self {
        let player_count = names.len();
        let max_health = config.max_health;
        let monsters = PlayerMap::new(player_count, |p| {
            Monster::new(p, names[p.index()].clone(), max_health)
        });

        Self {
            dice: DiceSet::new(config.dice_count),
            config,
            monsters,
            tokyo: TokyoState::default(),
            market,
            collections: PlayerMap::new(player_count, |_| Vector::new()),
            turn: TurnState::new(),
            log: Vector::new(),
            outcome: None,
            history: Vector::new(),
        }
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.monsters.player_count()
    }

    /// Does this seat exist?
    #[must_use]
    pub fn has_seat(&self, seat: PlayerId) -> bool {
        seat.index() < self.player_count()
    }

    /// A seat's monster.
    #[must_use]
    pub fn monster(&self, seat: PlayerId) -> &Monster {
        &self.monsters[seat]
    }

    /// A seat's monster, mutably.
    pub fn monster_mut(&mut self, seat: PlayerId) -> &mut Monster {
        &mut self.monsters[seat]
    }

    /// Is this seat's monster still in the game?
    #[must_use]
    pub fn is_alive(&self, seat: PlayerId) -> bool {
        self.has_seat(seat) && self.monsters[seat].alive
    }

    /// Living seats in seat order.
    pub fn living(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.monsters
            .iter()
            .filter(|(_, m)| m.alive)
            .map(|(id, _)| id)
    }

    /// Living seats other than `seat`, in seat order.
    #[must_use]
    pub fn living_others(&self, seat: PlayerId) -> SmallVec<[PlayerId; 6]> {
        self.living().filter(|&p| p != seat).collect()
    }

    /// Number of living monsters.
    #[must_use]
    pub fn living_count(&self) -> usize {
        self.living().count()
    }

    /// The closest living seats on either side of `seat`, without repeats.
    #[must_use]
    pub fn living_neighbours(&self, seat: PlayerId) -> SmallVec<[PlayerId; 2]> {
        let count = self.player_count();
        let mut out = SmallVec::new();

        let mut right = seat.next(count);
        while right != seat && !self.is_alive(right) {
            right = right.next(count);
        }
        if right != seat {
            out.push(right);
        }

        let mut left = seat.previous(count);
        while left != seat && !self.is_alive(left) {
            left = left.previous(count);
        }
        if left != seat && !out.contains(&left) {
            out.push(left);
        }
        out
    }

    /// The next living seat after `seat`, wrapping around the table.
    #[must_use]
    pub fn next_living(&self, seat: PlayerId) -> Option<PlayerId> {
        let count = self.player_count();
        let mut candidate = seat.next(count);
        for _ in 0..count {
            if self.is_alive(candidate) {
                return Some(candidate);
            }
            candidate = candidate.next(count);
        }
        None
    }

    /// Keep cards owned by a seat.
    #[must_use]
    pub fn collection(&self, seat: PlayerId) -> &Vector<OwnedCard> {
        &self.collections[seat]
    }

    /// Position of `card` in a seat's collection, ignoring Mimic copies.
    #[must_use]
    pub fn card_index(&self, seat: PlayerId, card: CardId) -> Option<usize> {
        self.collections[seat].iter().position(|c| c.id == card)
    }

    /// Does the seat own this card itself?
    #[must_use]
    pub fn owns(&self, seat: PlayerId, card: CardId) -> bool {
        self.card_index(seat, card).is_some()
    }

    /// Remove the card at `index` from a seat's collection.
    pub fn discard_card(&mut self, seat: PlayerId, index: usize) -> Option<OwnedCard> {
        let collection = &mut self.collections[seat];
        if index < collection.len() {
            Some(collection.remove(index))
        } else {
            None
        }
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn active(&self) -> PlayerId {
        self.turn.active
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.turn.phase
    }

    /// Append a line to the turn log.
    pub fn log(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::trace!(%line, "turn log");
        self.log.push_back(line);
    }

    /// Display name of a seat's monster.
    #[must_use]
    pub fn name(&self, seat: PlayerId) -> &str {
        &self.monsters[seat].name
    }

    /// Verify the structural invariants that legal play maintains.
    pub fn check_invariants(&self) -> Result<(), RulesError> {
        let tokyo = &self.tokyo;

        if tokyo.is_pending() {
            let (Some(occupant), Some(attacker)) = (tokyo.occupant, tokyo.attacker) else {
                return Err(RulesError::invariant(
                    "pending damage without occupant or attacker",
                ));
            };
            if occupant == attacker {
                return Err(RulesError::invariant("occupant attacked itself"));
            }
            if tokyo.decider != Some(occupant) {
                return Err(RulesError::invariant("yield decider is not the occupant"));
            }
        }

        let awaiting = self.turn.phase == Phase::AwaitingYieldDecision;
        if awaiting != tokyo.is_pending() {
            return Err(RulesError::invariant(
                "yield phase and pending damage disagree",
            ));
        }

        for (seat, monster) in self.monsters.iter() {
            if monster.in_tokyo != (tokyo.occupant == Some(seat)) {
                return Err(RulesError::invariant(format!(
                    "{seat} Tokyo flag disagrees with occupancy"
                )));
            }
            if !monster.alive && monster.in_tokyo {
                return Err(RulesError::invariant(format!(
                    "{seat} is eliminated but occupies Tokyo"
                )));
            }
            if monster.health > crate::effects::max_health(self, seat) {
                return Err(RulesError::invariant(format!(
                    "{seat} health above maximum"
                )));
            }
        }

        if !self.market.is_consistent() {
            return Err(RulesError::invariant(
                "market slot empty while the pile has cards",
            ));
        }

        Ok(())
    }
}
