//! Base dice scoring.
//!
//! `resolve` is pure: identical faces and occupancy always produce the same
//! [`DiceResolution`]. Nothing here knows about cards.

use serde::{Deserialize, Serialize};

use super::face::DieFace;

/// Occurrences of each face, indexed by [`DieFace::index`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceCounts([u32; 6]);

impl FaceCounts {
    /// How many dice show `face`.
    #[must_use]
    pub fn of(&self, face: DieFace) -> u32 {
        self.0[face.index()]
    }

    /// True when `face` appears at least three times.
    #[must_use]
    pub fn has_triple(&self, face: DieFace) -> bool {
        self.of(face) >= 3
    }

    /// True when every face in `faces` appears at least once.
    #[must_use]
    pub fn contains_all(&self, faces: &[DieFace]) -> bool {
        faces.iter().all(|&f| self.of(f) > 0)
    }
}

/// Count occurrences of each face.
#[must_use]
pub fn count_faces(faces: &[DieFace]) -> FaceCounts {
    let mut counts = [0u32; 6];
    for face in faces {
        counts[face.index()] += 1;
    }
    FaceCounts(counts)
}

/// Raw outcome of a hand before card modifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceResolution {
    pub victory_points: u32,
    pub damage: u32,
    pub heal: u32,
    pub energy: u32,
}

/// Score a hand.
///
/// Three of a number score its value, each further matching die one more
/// point; every number scores independently. Claws are damage, lightning
/// is energy, hearts heal unless the roller occupies Tokyo.
///
/// ```
/// use tokyo_rules::dice::{resolve, DieFace::*};
///
/// let r = resolve(&[One, One, One, One, Claw, Heart], false);
/// assert_eq!(r.victory_points, 2);
/// assert_eq!(r.damage, 1);
/// assert_eq!(r.heal, 1);
/// ```
#[must_use]
pub fn resolve(faces: &[DieFace], in_tokyo: bool) -> DiceResolution {
    let counts = count_faces(faces);

    let victory_points = [DieFace::One, DieFace::Two, DieFace::Three]
        .into_iter()
        .filter_map(|face| {
            let n = counts.of(face);
            let value = face.number()?;
            (n >= 3).then(|| value + (n - 3))
        })
        .sum();

    DiceResolution {
        victory_points,
        damage: counts.of(DieFace::Claw),
        heal: if in_tokyo { 0 } else { counts.of(DieFace::Heart) },
        energy: counts.of(DieFace::Lightning),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DieFace::*;

    #[test]
    fn test_triple_twos_and_lightning() {
        let hand = [Two, Two, Two, Lightning, Lightning, Lightning];
        for in_tokyo in [false, true] {
            let r = resolve(&hand, in_tokyo);
            assert_eq!(
                r,
                DiceResolution { victory_points: 2, damage: 0, heal: 0, energy: 3 }
            );
        }
    }

    #[test]
    fn test_four_ones_score_two() {
        let r = resolve(&[One, One, One, One, Claw, Lightning], false);
        assert_eq!(r.victory_points, 2);
    }

    #[test]
    fn test_two_numbers_score_independently() {
        let r = resolve(&[Three, Three, Three, One, One, One], false);
        assert_eq!(r.victory_points, 4);
    }

    #[test]
    fn test_pair_scores_nothing() {
        let r = resolve(&[Three, Three, Claw, Claw, Heart, Heart], false);
        assert_eq!(r.victory_points, 0);
        assert_eq!(r.damage, 2);
        assert_eq!(r.heal, 2);
    }

    #[test]
    fn test_hearts_discarded_in_tokyo() {
        let hand = [Heart, Heart, Heart, Claw, One, Two];
        assert_eq!(resolve(&hand, true).heal, 0);
        assert_eq!(resolve(&hand, false).heal, 3);
    }

    #[test]
    fn test_six_threes() {
        let r = resolve(&[Three; 6], false);
        assert_eq!(r.victory_points, 6);
    }

    #[test]
    fn test_counts_helpers() {
        let counts = count_faces(&[One, Two, Three, Claw, Heart, Lightning]);
        assert!(counts.contains_all(&DieFace::ALL));
        assert!(!counts.has_triple(One));
        assert_eq!(counts.of(Claw), 1);
    }
}
