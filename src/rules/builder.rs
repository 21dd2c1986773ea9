//! Game setup.

use crate::cards::CardId;
use crate::core::{GameState, PlayerId, RandomSource, RulesConfig, RulesError};
use crate::market::Market;

use super::game::TokyoRules;
use super::turn;

/// Smallest table the rules support.
pub const MIN_SEATS: usize = 2;

/// Largest table a [`PlayerId`] can address. The card set is balanced for
/// six, but bigger tables are allowed.
pub const MAX_SEATS: usize = u8::MAX as usize;

/// Builder for a fresh game.
///
/// ## Example
///
/// ```
/// use tokyo_rules::core::{GameRng, Phase, PlayerId};
/// use tokyo_rules::rules::GameBuilder;
///
/// let mut rng = GameRng::new(7);
/// let (_rules, state) = GameBuilder::new(4).build(&mut rng).unwrap();
///
/// assert_eq!(state.active(), PlayerId::new(0));
/// assert_eq!(state.phase(), Phase::Rolling);
/// assert_eq!(state.dice.len(), 6);
/// ```
#[derive(Clone, Debug)]
pub struct GameBuilder {
    seats: usize,
    names: Vec<String>,
    config: RulesConfig,
    deck_order: Option<Vec<CardId>>,
}

impl GameBuilder {
    /// Start a game description for `seats` monsters.
    #[must_use]
    pub fn new(seats: usize) -> Self {
        Self {
            seats,
            names: Vec::new(),
            config: RulesConfig::default(),
            deck_order: None,
        }
    }

    /// Monster names by seat. Missing names default to "Monster N".
    #[must_use]
    pub fn names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Override the rule constants.
    #[must_use]
    pub fn config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a fixed pile order instead of shuffling the catalog.
    #[must_use]
    pub fn deck_order(mut self, cards: Vec<CardId>) -> Self {
        self.deck_order = Some(cards);
        self
    }

    /// Shuffle the pile, deal the market and start seat 0's first turn.
    pub fn build(self, rng: &mut dyn RandomSource) -> Result<(TokyoRules, GameState), RulesError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&self.seats) {
            return Err(RulesError::Config(format!(
                "{} seats requested, expected {MIN_SEATS} to {MAX_SEATS}",
                self.seats
            )));
        }
        if self.names.len() > self.seats {
            return Err(RulesError::Config(format!(
                "{} names given for {} seats",
                self.names.len(),
                self.seats
            )));
        }
        if self.config.dice_count == 0 {
            return Err(RulesError::Config("dice_count must be positive".into()));
        }

        let rules = TokyoRules::new();
        let pile = match self.deck_order {
            Some(cards) => {
                if let Some(bad) = cards.iter().find(|&&c| !rules.catalog().contains(c)) {
                    return Err(RulesError::Config(format!("unknown card {bad}")));
                }
                cards
            }
            None => {
                let mut cards: Vec<CardId> = rules.catalog().ids().collect();
                rng.shuffle(&mut cards);
                cards
            }
        };

        let names: Vec<String> = (0..self.seats)
            .map(|i| {
                self.names
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("Monster {}", i + 1))
            })
            .collect();

        let mut state = GameState::new(self.config, &names, Market::new(pile));
        turn::begin_turn(&mut state, PlayerId::new(0), rng);
        state.check_invariants()?;

        tracing::info!(seats = self.seats, "game started");
        Ok((rules, state))
    }
}
