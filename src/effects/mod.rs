//! Card effect dispatcher.
//!
//! Cards are data ([`crate::cards::Effect`] lists); this module gives them
//! meaning:
//! - `passive`: what a seat's collection currently grants, Mimic included
//! - `damage`: the single gain path and the single damage path
//! - `resolver`: dice modifiers, purchase-time effects, timed passives
//! - `abilities`: activated abilities behind the card actions
//!
//! ## Ordering
//!
//! Damage may eliminate a monster. Elimination rewards for every other
//! living monster are paid inside the same call, before control returns to
//! the turn state machine.

pub mod abilities;
mod damage;
mod passive;
mod resolver;

pub use damage::{apply_damage, clamp_health, eliminate, enter_tokyo, gain_energy, heal, leave_tokyo};
pub use passive::{
    active_effects, copy_is_active, discount, effective_cost, find_ability, has_effect, is_mimic,
    max_health, sum_effects, ActiveEffects,
};
pub use resolver::{acquire_card, end_of_turn, run_immediate, score_dice, start_of_turn, ScoredDice};
