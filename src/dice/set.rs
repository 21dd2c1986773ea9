//! The dice in play this turn.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::face::DieFace;
use crate::core::error::IllegalAction;
use crate::core::rng::RandomSource;

/// Faces, held flags and the reroll counter for the current turn.
///
/// Six dice is the norm; Extra Head adds dice and Shrink Ray or Freeze Time
/// remove them, so the set is sized per turn. SmallVec keeps up to eight
/// dice inline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceSet {
    faces: SmallVec<[DieFace; 8]>,
    held: SmallVec<[bool; 8]>,
    rerolls_left: u32,
}

impl DiceSet {
    /// Create `count` unheld dice showing ① with no rerolls.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            faces: SmallVec::from_elem(DieFace::One, count),
            held: SmallVec::from_elem(false, count),
            rerolls_left: 0,
        }
    }

    /// Create a set showing exactly `faces`.
    #[must_use]
    pub fn from_faces(faces: &[DieFace], rerolls_left: u32) -> Self {
        Self {
            faces: SmallVec::from_slice(faces),
            held: SmallVec::from_elem(false, faces.len()),
            rerolls_left,
        }
    }

    /// Start a turn: resize to `count` dice, clear holds, set rerolls and
    /// roll everything.
    pub fn begin_turn(&mut self, count: usize, rerolls: u32, rng: &mut dyn RandomSource) {
        *self = Self::new(count);
        self.rerolls_left = rerolls;
        self.roll_unheld(rng);
    }

    /// Roll every die that is not held.
    pub fn roll_unheld(&mut self, rng: &mut dyn RandomSource) {
        for (face, held) in self.faces.iter_mut().zip(&self.held) {
            if !*held {
                *face = rng.die_face();
            }
        }
    }

    /// Roll a single die regardless of its held flag.
    pub fn reroll_die(&mut self, index: usize, rng: &mut dyn RandomSource) -> Result<DieFace, IllegalAction> {
        self.check_index(index)?;
        let face = rng.die_face();
        self.faces[index] = face;
        Ok(face)
    }

    /// Flip one die's held flag.
    pub fn toggle_hold(&mut self, index: usize) -> Result<(), IllegalAction> {
        self.check_index(index)?;
        self.held[index] = !self.held[index];
        Ok(())
    }

    /// Force a die to show `face`.
    pub fn set_face(&mut self, index: usize, face: DieFace) -> Result<(), IllegalAction> {
        self.check_index(index)?;
        self.faces[index] = face;
        Ok(())
    }

    /// Error unless `index` names a die.
    pub fn check_index(&self, index: usize) -> Result<(), IllegalAction> {
        if index < self.faces.len() {
            Ok(())
        } else {
            Err(IllegalAction::DieOutOfRange)
        }
    }

    /// Current faces.
    #[must_use]
    pub fn faces(&self) -> &[DieFace] {
        &self.faces
    }

    /// Held flags, parallel to [`DiceSet::faces`].
    #[must_use]
    pub fn held(&self) -> &[bool] {
        &self.held
    }

    /// Number of dice.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// True when there are no dice.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// True when every die is held.
    #[must_use]
    pub fn all_held(&self) -> bool {
        self.held.iter().all(|&h| h)
    }

    /// True when every unheld die shows `face`.
    #[must_use]
    pub fn unheld_all_show(&self, face: DieFace) -> bool {
        self.faces
            .iter()
            .zip(&self.held)
            .filter(|(_, &held)| !held)
            .all(|(&f, _)| f == face)
    }

    /// Rerolls remaining.
    #[must_use]
    pub fn rerolls_left(&self) -> u32 {
        self.rerolls_left
    }

    /// Grant more rerolls.
    pub fn add_rerolls(&mut self, n: u32) {
        self.rerolls_left += n;
    }

    /// Use one reroll. Returns false when none are left.
    pub fn consume_reroll(&mut self) -> bool {
        if self.rerolls_left == 0 {
            return false;
        }
        self.rerolls_left -= 1;
        true
    }

    /// Drop all remaining rerolls.
    pub fn exhaust(&mut self) {
        self.rerolls_left = 0;
    }
}
