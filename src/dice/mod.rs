//! Dice: faces, the per-turn dice set, and the base resolver.
//!
//! The resolver scores a hand without looking at any card. Card modifiers
//! are layered on top by [`crate::effects`].

mod face;
mod resolver;
mod set;

pub use face::DieFace;
pub use resolver::{count_faces, resolve, DiceResolution, FaceCounts};
pub use set::DiceSet;
