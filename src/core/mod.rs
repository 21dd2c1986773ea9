//! Core engine types: players, monsters, state, actions, RNG, configuration.
//!
//! Everything here is plain data plus the invariants over it. Rule logic
//! lives in [`crate::effects`] and [`crate::rules`].

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod snapshot;
pub mod state;

pub use action::{Action, ActionRecord};
pub use config::RulesConfig;
pub use error::{IllegalAction, RulesError};
pub use player::{Monster, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState, RandomSource};
pub use snapshot::GameSnapshot;
pub use state::{GameState, Phase, TokyoState, TurnState};
