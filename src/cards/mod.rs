//! Card system: definitions, the effect table, the catalog and owned cards.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardKind`: Keep (persistent) or discard (one-shot)
//! - `CardDefinition`: Static card data plus its effect table entries
//! - `Effect`: One rule clause from the closed set of effect shapes
//! - `CardCatalog`: Lookup over the 64 standard cards
//! - `OwnedCard`: A keep card in a monster's collection

pub mod catalog;
pub mod definition;
pub mod effect;
pub mod owned;

pub use catalog::{card_definition, CardCatalog, CARD_COUNT};
pub use definition::{CardDefinition, CardId, CardKind};
pub use effect::{Ability, AttackCondition, Combo, Effect};
pub use owned::OwnedCard;
