//! # tokyo-rules
//!
//! Authoritative rules engine for a dice-rolling monster battle game:
//! monsters roll dice to attack, heal, earn energy and score victory points,
//! fight over the single Tokyo slot and buy upgrade cards from a market.
//!
//! ## Design Principles
//!
//! 1. **Host-driven**: The engine owns every state mutation but never owns a
//!    clock, a socket or a source of entropy. Hosts submit actions and pass
//!    in a [`RandomSource`].
//!
//! 2. **All or nothing**: An action is validated, applied to a working copy
//!    and committed only on success. Persistent `im` collections keep the
//!    copy cheap.
//!
//! 3. **Cards are data**: The 64 cards are a static effect table. One
//!    dispatcher interprets it, so every gain and every hit goes through the
//!    same path.
//!
//! ## Modules
//!
//! - `core`: Players, monsters, state, actions, RNG, configuration, errors
//! - `dice`: Faces, the dice set and the base resolver
//! - `cards`: Card definitions, the effect table and the catalog
//! - `effects`: Card effect dispatcher and the damage path
//! - `market`: Draw pile, face-up slots and purchases
//! - `rules`: Turn state machine, coordinator and win evaluation
//!
//! ## Example
//!
//! ```
//! use tokyo_rules::{Action, GameBuilder, GameRng, Phase, RulesEngine};
//!
//! let mut rng = GameRng::new(3);
//! let (rules, mut state) = GameBuilder::new(2).build(&mut rng).unwrap();
//! let seat = state.active();
//!
//! rules.apply_action(&mut state, seat, Action::LockIn, &mut rng).unwrap();
//! // Tokyo starts empty, so the first roller simply walks in.
//! assert_eq!(state.phase(), Phase::Resolved);
//! assert_eq!(state.tokyo.occupant, Some(seat));
//! assert!(rules.legal_actions(&state, seat).contains(&Action::EndTurn));
//! ```

pub mod cards;
pub mod core;
pub mod dice;
pub mod effects;
pub mod market;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, GameRng, GameRngState, GameSnapshot, GameState, IllegalAction, Monster,
    Phase, PlayerId, PlayerMap, RandomSource, RulesConfig, RulesError, TokyoState,
};

pub use crate::cards::{CardCatalog, CardDefinition, CardId, CardKind, Effect, OwnedCard};

pub use crate::dice::{DiceSet, DieFace};

pub use crate::market::Market;

pub use crate::rules::{GameBuilder, GameResult, RulesEngine, TokyoRules};
