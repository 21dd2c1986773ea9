//! Rule errors.
//!
//! Two families exist. [`IllegalAction`] is the everyday rejection: the move
//! is not currently available and nothing changed. [`RulesError::Invariant`]
//! means the engine caught itself in an inconsistent state, which a legal
//! sequence of actions can never produce.

use thiserror::Error;

/// Why an action was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum IllegalAction {
    #[error("action not available in the current phase")]
    WrongPhase,
    #[error("it is not this seat's turn")]
    NotYourTurn,
    #[error("only the attacked Tokyo occupant may decide")]
    NotDecider,
    #[error("die index out of range")]
    DieOutOfRange,
    #[error("market slot out of range")]
    SlotOutOfRange,
    #[error("market slot is empty")]
    EmptySlot,
    #[error("not enough energy")]
    CannotAfford,
    #[error("no rerolls left")]
    NoRerollsLeft,
    #[error("every die is held")]
    AllDiceHeld,
    #[error("an attack on Tokyo is awaiting a decision")]
    PendingDamage,
    #[error("seat does not own the required card")]
    MissingAbility,
    #[error("ability already used up")]
    AbilityExhausted,
    #[error("invalid target")]
    InvalidTarget,
    #[error("monster has been eliminated")]
    PlayerEliminated,
    #[error("the game is over")]
    GameOver,
    #[error("card is not owned by that seat")]
    CardNotOwned,
    #[error("the card pile is empty")]
    PileEmpty,
}

/// Errors surfaced by the rules engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RulesError {
    /// The move is not currently available. State is unchanged.
    #[error("illegal action: {0}")]
    Illegal(#[from] IllegalAction),

    /// Internal consistency failure; indicates a defect in the engine.
    #[error("rules invariant violated: {0}")]
    Invariant(String),

    /// A configuration could not be parsed.
    #[error("invalid rules config: {0}")]
    Config(String),

    /// A snapshot could not be encoded or decoded.
    #[error("snapshot codec failed: {0}")]
    Codec(String),
}

impl RulesError {
    /// True for recoverable rejections.
    #[must_use]
    pub fn is_illegal(&self) -> bool {
        matches!(self, RulesError::Illegal(_))
    }

    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::warn!(%message, "rules invariant violated");
        RulesError::Invariant(message)
    }
}
