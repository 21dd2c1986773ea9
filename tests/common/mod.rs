//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Once;

use tokyo_rules::{CardCatalog, CardId, DieFace, RandomSource};
use tracing_subscriber::{fmt, EnvFilter};

static LOGGING: Once = Once::new();

/// Install a test subscriber once. `TEST_LOG`, then `RUST_LOG`, default "warn".
pub fn init_logging() {
    LOGGING.call_once(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Dice that come up in a fixed order, then repeat a fallback face.
///
/// Shuffling leaves the pile untouched so a fixed deck order stays fixed.
#[derive(Debug)]
pub struct ScriptedDice {
    faces: VecDeque<DieFace>,
    fallback: DieFace,
}

impl ScriptedDice {
    pub fn new(faces: &[DieFace]) -> Self {
        init_logging();
        Self {
            faces: faces.iter().copied().collect(),
            fallback: DieFace::Three,
        }
    }

    pub fn with_fallback(mut self, face: DieFace) -> Self {
        self.fallback = face;
        self
    }

    /// Faces not yet rolled.
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl RandomSource for ScriptedDice {
    fn die_face(&mut self) -> DieFace {
        self.faces.pop_front().unwrap_or(self.fallback)
    }

    fn shuffle(&mut self, _cards: &mut [CardId]) {}
}

/// Catalog id by card name.
pub fn card(name: &str) -> CardId {
    CardCatalog::standard()
        .by_name(name)
        .unwrap_or_else(|| panic!("no card named {name}"))
        .id
}

/// A pile that starts with the named cards, followed by filler.
pub fn deck(names: &[&str]) -> Vec<CardId> {
    let mut cards: Vec<CardId> = names.iter().map(|n| card(n)).collect();
    cards.extend(["Corner Store", "Commuter Train", "Skyscraper"].map(card));
    cards
}
