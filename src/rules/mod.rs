//! Rules: the engine trait, the Tokyo coordinator and the turn state machine.
//!
//! Hosts drive a game through [`TokyoRules`] (or the [`RulesEngine`] trait
//! it implements):
//! - `legal_actions` lists what a seat may do right now
//! - `apply_action` validates and commits one action atomically
//! - `is_terminal` reports the outcome once the game is decided
//!
//! [`turn`] holds the phase transitions themselves. They assume the
//! coordinator already validated the action.

mod builder;
pub mod engine;
mod game;
pub mod turn;

pub use builder::{GameBuilder, MAX_SEATS, MIN_SEATS};
pub use engine::{evaluate_outcome, GameResult, RulesEngine};
pub use game::{cards_in_play, TokyoRules};
