//! A player's hand.
//!
//! Hands hold four cards at rest and five for the moment between a draw and
//! the matching discard, so they are stored inline in a `SmallVec`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::card::{join_cards, Card};
use crate::core::config::HAND_SIZE;
use crate::core::player::PlayerId;

/// Ordered cards held by one player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: SmallVec<[Card; HAND_SIZE + 1]>,
}

impl Hand {
    /// Create a hand from cards in deal order.
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Number of cards held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in hand order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Copy of the cards in hand order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Card> {
        self.cards.to_vec()
    }

    /// Add a drawn card to the end of the hand.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove the first card with the same value.
    ///
    /// Returns `false` if no such card is held.
    pub fn remove_first(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|&c| c == card) {
            Some(pos) => {
                self.cards.remove(pos);
                true
            }
            None => false,
        }
    }

    /// The value that makes this hand a winner, if any.
    ///
    /// Cards are counted in hand order and the first value to reach
    /// `HAND_SIZE` copies wins. There is no numeric preference between values.
    #[must_use]
    pub fn winning_value(&self) -> Option<Card> {
        let mut counts: FxHashMap<Card, usize> = FxHashMap::default();
        for &card in &self.cards {
            let count = counts.entry(card).or_insert(0);
            *count += 1;
            if *count == HAND_SIZE {
                return Some(card);
            }
        }
        None
    }

    /// Whether some value appears at least `HAND_SIZE` times.
    #[must_use]
    pub fn is_winning(&self) -> bool {
        self.winning_value().is_some()
    }

    /// Pick the card to pass on.
    ///
    /// The first card whose value differs from the player's own id goes. If
    /// every card matches the id, the first card goes.
    ///
    /// Panics on an empty hand.
    #[must_use]
    pub fn select_discard(&self, player: PlayerId) -> Card {
        self.cards
            .iter()
            .copied()
            .find(|card| card.value() != player.raw())
            .unwrap_or(self.cards[0])
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&join_cards(&self.cards))
    }
}
