//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: its name,
//! listed cost, whether it is kept or discarded, its rules text and the
//! effect table entries that implement that text.

use serde::{Deserialize, Serialize};

use super::effect::Effect;

/// Identifier of a card definition (1-based catalog number).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Whether a purchased card stays with its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Kept in the owner's collection and consulted every turn.
    Keep,
    /// Applied once at purchase, then gone.
    Discard,
}

/// Static card definition.
///
/// ```
/// use tokyo_rules::cards::{CardCatalog, CardId, CardKind};
///
/// let catalog = CardCatalog::standard();
/// let energize = catalog.get(CardId::new(15)).unwrap();
/// assert_eq!(energize.name, "Energize");
/// assert_eq!(energize.kind, CardKind::Discard);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name.
    pub name: &'static str,

    /// Listed energy cost.
    pub cost: u32,

    /// Keep or discard.
    pub kind: CardKind,

    /// Rules text.
    pub text: &'static str,

    /// Effect table entries implementing the text.
    #[serde(skip)]
    pub effects: &'static [Effect],
}

impl CardDefinition {
    /// True for cards that stay in a collection.
    #[must_use]
    pub fn is_keep(&self) -> bool {
        self.kind == CardKind::Keep
    }
}
