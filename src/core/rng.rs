//! Deterministic randomness injected into the engine.
//!
//! The engine never owns entropy. Every action that rolls dice or shuffles
//! the card pile receives a [`RandomSource`] from its caller, so a host that
//! replays the same seed replays the same game.
//!
//! [`GameRng`] is the standard implementation:
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Serializable**: O(1) state capture and restore
//!
//! ```
//! use tokyo_rules::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.die_face(), b.die_face());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::dice::DieFace;

/// Capability supplying the randomness the rules need.
///
/// Both operations must be deterministic for a given seed.
pub trait RandomSource {
    /// Roll one die.
    fn die_face(&mut self) -> DieFace;

    /// Permute a sequence of card ids in place.
    fn shuffle(&mut self, cards: &mut [CardId]);
}

/// Deterministic, checkpointable RNG.
///
/// Uses ChaCha8 for speed while maintaining good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RandomSource for GameRng {
    fn die_face(&mut self) -> DieFace {
        DieFace::from_index(self.inner.gen_range(0..6))
    }

    fn shuffle(&mut self, cards: &mut [CardId]) {
        use rand::seq::SliceRandom;
        cards.shuffle(&mut self.inner);
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses the ChaCha8 word position for O(1) serialization regardless of
/// how many values have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.die_face(), rng2.die_face());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..32).map(|_| rng1.die_face()).collect();
        let seq2: Vec<_> = (0..32).map(|_| rng2.die_face()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_all_faces_appear() {
        let mut rng = GameRng::new(9);
        let mut seen = [false; 6];
        for _ in 0..600 {
            seen[rng.die_face().index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = GameRng::new(42);
        let original: Vec<CardId> = (1..=10).map(CardId::new).collect();
        let mut cards = original.clone();

        rng.shuffle(&mut cards);

        assert_ne!(cards, original);
        cards.sort_by_key(|c| c.raw());
        assert_eq!(cards, original);
    }

    #[test]
    fn test_state_restore() {
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            rng.die_face();
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.die_face()).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.die_face()).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRngState {
            seed: 42,
            word_pos: 12345,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }
}
