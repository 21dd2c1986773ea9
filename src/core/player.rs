//! Seats, per-seat storage and the monster record.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier supporting 1-255 seats.
//!
//! ## PlayerMap
//!
//! Per-seat data storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `PlayerId`.
//!
//! ## Monster
//!
//! The record a seat controls. Never removed: elimination only clears
//! `alive`, so effects that care about fallen monsters can still see them.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier supporting 1-255 seats.
///
/// Seat indices are 0-based: the first seat is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats for a game with `player_count` seats.
    ///
    /// ```
    /// use tokyo_rules::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// The seat after this one, wrapping around the table.
    #[must_use]
    pub fn next(self, player_count: usize) -> PlayerId {
        PlayerId(((self.index() + 1) % player_count) as u8)
    }

    /// The seat before this one, wrapping around the table.
    #[must_use]
    pub fn previous(self, player_count: usize) -> PlayerId {
        PlayerId(((self.index() + player_count - 1) % player_count) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per seat.
///
/// ## Example
///
/// ```
/// use tokyo_rules::core::{PlayerId, PlayerMap};
///
/// let mut energy: PlayerMap<u32> = PlayerMap::new(4, |_| 0);
/// energy[PlayerId::new(1)] = 5;
/// assert_eq!(energy[PlayerId::new(1)], 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each seat.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Get the number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over the stored values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate over all seats.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// A seat's monster.
///
/// Health is kept within `0..=max` by the damage and heal paths in
/// [`crate::effects`]; the maximum itself depends on owned cards and is
/// therefore computed there rather than stored here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    /// Seat controlling this monster.
    pub id: PlayerId,

    /// Display name.
    pub name: String,

    /// Current health.
    pub health: u32,

    /// Victory points.
    pub victory_points: u32,

    /// Energy cubes held.
    pub energy: u32,

    /// False once eliminated.
    pub alive: bool,

    /// True while occupying Tokyo.
    pub in_tokyo: bool,

    /// Poison counters: one damage each at the end of this monster's turn.
    pub poison: u32,

    /// Shrink counters: one less die each per turn.
    pub shrink: u32,
}

impl Monster {
    /// Create a fresh monster at full health.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, health: u32) -> Self {
        Self {
            id,
            name: name.into(),
            health,
            victory_points: 0,
            energy: 0,
            alive: true,
            in_tokyo: false,
            poison: 0,
            shrink: 0,
        }
    }

    /// Lose victory points, never dropping below zero.
    ///
    /// Returns the points actually lost.
    pub fn lose_victory_points(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.victory_points);
        self.victory_points -= lost;
        lost
    }

    /// Spend energy if enough is held.
    ///
    /// Returns false (and spends nothing) when the monster cannot pay.
    pub fn spend_energy(&mut self, amount: u32) -> bool {
        if self.energy < amount {
            return false;
        }
        self.energy -= amount;
        true
    }
}
