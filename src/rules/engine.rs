//! Rules engine trait and win evaluation.
//!
//! The coordinator implements `RulesEngine` to define:
//! - What actions are legal for a seat
//! - How actions modify state
//! - Win/draw conditions

use serde::{Deserialize, Serialize};

use crate::core::action::Action;
use crate::core::error::RulesError;
use crate::core::player::PlayerId;
use crate::core::rng::RandomSource;
use crate::core::state::GameState;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Every monster fell at once.
    Draw,
}

impl GameResult {
    /// Check if a seat won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Draw => false,
        }
    }
}

/// Decide the game from current standings.
///
/// Elimination outcomes take precedence: nobody alive is a draw, one
/// survivor wins. Otherwise the lowest seat with enough victory points wins.
#[must_use]
pub fn evaluate_outcome(state: &GameState) -> Option<GameResult> {
    let mut living = state.living();
    match (living.next(), living.next()) {
        (None, _) => return Some(GameResult::Draw),
        (Some(survivor), None) => return Some(GameResult::Winner(survivor)),
        _ => {}
    }

    let target = state.config.victory_points_to_win;
    state
        .living()
        .find(|&p| state.monster(p).victory_points >= target)
        .map(GameResult::Winner)
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Return empty vec if the seat can't act
/// - `apply_action`: Either commits the whole action or changes nothing
/// - `is_terminal`: Return None if the game continues
pub trait RulesEngine {
    /// Enumerate every action the seat may take right now.
    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action>;

    /// Apply an action to the game state.
    ///
    /// Deterministic for a given random source.
    fn apply_action(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: Action,
        rng: &mut dyn RandomSource,
    ) -> Result<(), RulesError>;

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;
}
