//! Die faces.

use serde::{Deserialize, Serialize};

/// One of the six symbols on a die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DieFace {
    One,
    Two,
    Three,
    Claw,
    Heart,
    Lightning,
}

impl DieFace {
    /// All faces in canonical order.
    pub const ALL: [DieFace; 6] = [
        DieFace::One,
        DieFace::Two,
        DieFace::Three,
        DieFace::Claw,
        DieFace::Heart,
        DieFace::Lightning,
    ];

    /// Face for a 0-based roll index.
    ///
    /// Indices wrap, so any `usize` maps onto a face.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 6]
    }

    /// Position of this face in [`DieFace::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Numeric value for ①②③, `None` for symbol faces.
    #[must_use]
    pub const fn number(self) -> Option<u32> {
        match self {
            DieFace::One => Some(1),
            DieFace::Two => Some(2),
            DieFace::Three => Some(3),
            _ => None,
        }
    }
}

impl std::fmt::Display for DieFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DieFace::One => "1",
            DieFace::Two => "2",
            DieFace::Three => "3",
            DieFace::Claw => "claw",
            DieFace::Heart => "heart",
            DieFace::Lightning => "lightning",
        };
        f.write_str(s)
    }
}
