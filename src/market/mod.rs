//! The card market: draw pile, three face-up slots, purchases and sweeps.
//!
//! [`Market`] holds the cards; [`purchase`] implements the paid actions on
//! top of it, routing every acquired card through the effect dispatcher.

pub mod purchase;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::error::IllegalAction;

/// Number of face-up market slots.
pub const MARKET_SLOTS: usize = 3;

/// Draw pile plus face-up slots.
///
/// A slot is only empty when the pile ran out at the last refill. The pile
/// front is the next card drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    pile: Vector<CardId>,
    slots: [Option<CardId>; MARKET_SLOTS],
    fresh: [bool; MARKET_SLOTS],
}

impl Market {
    /// Build a market from an already shuffled pile and deal the slots.
    #[must_use]
    pub fn new(pile: impl IntoIterator<Item = CardId>) -> Self {
        let mut market = Self {
            pile: pile.into_iter().collect(),
            slots: [None; MARKET_SLOTS],
            fresh: [false; MARKET_SLOTS],
        };
        market.refill();
        market
    }

    /// Fill empty slots from the pile front.
    ///
    /// Cards revealed by this refill are marked fresh; earlier marks are
    /// cleared. Returns how many cards were revealed.
    pub fn refill(&mut self) -> usize {
        self.fresh = [false; MARKET_SLOTS];
        let mut revealed = 0;
        for (slot, fresh) in self.slots.iter_mut().zip(self.fresh.iter_mut()) {
            if slot.is_none() {
                if let Some(card) = self.pile.pop_front() {
                    *slot = Some(card);
                    *fresh = true;
                    revealed += 1;
                }
            }
        }
        revealed
    }

    /// The card in a slot.
    pub fn slot(&self, index: usize) -> Result<Option<CardId>, IllegalAction> {
        self.slots
            .get(index)
            .copied()
            .ok_or(IllegalAction::SlotOutOfRange)
    }

    /// Remove the card from a slot, leaving it empty until the next refill.
    pub fn take(&mut self, index: usize) -> Result<CardId, IllegalAction> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(IllegalAction::SlotOutOfRange)?;
        let card = slot.take().ok_or(IllegalAction::EmptySlot)?;
        self.fresh[index] = false;
        Ok(card)
    }

    /// Move every face-up card to the bottom of the pile and deal new ones.
    pub fn sweep(&mut self) {
        for slot in &mut self.slots {
            if let Some(card) = slot.take() {
                self.pile.push_back(card);
            }
        }
        self.refill();
    }

    /// Take the top card of the pile.
    pub fn draw_top(&mut self) -> Option<CardId> {
        self.pile.pop_front()
    }

    /// Look at the top card of the pile.
    #[must_use]
    pub fn peek_top(&self) -> Option<CardId> {
        self.pile.front().copied()
    }

    /// Face-up slots.
    #[must_use]
    pub fn slots(&self) -> &[Option<CardId>; MARKET_SLOTS] {
        &self.slots
    }

    /// Was the card in this slot revealed by the latest refill?
    #[must_use]
    pub fn is_fresh(&self, index: usize) -> bool {
        self.fresh.get(index).copied().unwrap_or(false)
    }

    /// Forget which cards are fresh.
    pub fn clear_fresh(&mut self) {
        self.fresh = [false; MARKET_SLOTS];
    }

    /// Cards left in the pile.
    #[must_use]
    pub fn pile_len(&self) -> usize {
        self.pile.len()
    }

    /// True when a slot is empty while the pile still has cards.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.pile.is_empty() || self.slots.iter().all(Option::is_some)
    }
}
