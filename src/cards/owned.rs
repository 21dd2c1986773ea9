//! Cards in a monster's collection.
//!
//! A `CardDefinition` is shared by everyone; an `OwnedCard` is one monster's
//! copy of it, carrying the little runtime state some cards need (charges
//! on Smoke Cloud and Monster Batteries, the copy target of Mimic).

use serde::{Deserialize, Serialize};

use super::catalog::card_definition;
use super::definition::{CardDefinition, CardId};

/// A keep card owned by a monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnedCard {
    /// Which card this is.
    pub id: CardId,

    /// Remaining charges (reroll charges or stored energy).
    pub charges: u32,

    /// Card being copied, for Mimic.
    pub copy_of: Option<CardId>,
}

impl OwnedCard {
    /// A freshly acquired card with no runtime state.
    #[must_use]
    pub fn new(id: CardId) -> Self {
        Self {
            id,
            charges: 0,
            copy_of: None,
        }
    }

    /// Set charges (builder pattern).
    #[must_use]
    pub fn with_charges(mut self, charges: u32) -> Self {
        self.charges = charges;
        self
    }

    /// The static definition.
    #[must_use]
    pub fn definition(&self) -> Option<&'static CardDefinition> {
        card_definition(self.id)
    }
}
