//! Round-robin deal of a pack into hands and decks.
//!
//! The first `HAND_SIZE × n` cards go to the players one at a time in seat
//! order; the rest go to the decks the same way. For `n = 2` and the pack
//! `1 2 1 2 ...` player 1 ends up with all the 1s and player 2 with all the
//! 2s.

use crate::core::card::Card;
use crate::core::config::HAND_SIZE;
use crate::core::error::SetupError;
use crate::core::player::{DeckId, PlayerId};

use super::pack::Pack;

/// Dealt hands and deck contents, indexed by 0-based seat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deal {
    hands: Vec<Vec<Card>>,
    decks: Vec<Vec<Card>>,
}

impl Deal {
    /// Deal `pack` to `player_count` players.
    ///
    /// Fails if the pack is not exactly `8 × player_count` cards.
    pub fn new(pack: &Pack, player_count: usize) -> Result<Self, SetupError> {
        pack.validate_for(player_count)?;

        let mut hands = vec![Vec::with_capacity(HAND_SIZE); player_count];
        let mut decks = vec![Vec::new(); player_count];

        let (hand_cards, deck_cards) = pack.cards().split_at(HAND_SIZE * player_count);
        for (i, &card) in hand_cards.iter().enumerate() {
            hands[i % player_count].push(card);
        }
        for (i, &card) in deck_cards.iter().enumerate() {
            decks[i % player_count].push(card);
        }

        Ok(Self { hands, decks })
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.hands.len()
    }

    /// Cards dealt to `player`, or `None` for a seat outside the ring.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> Option<&[Card]> {
        self.hands.get(player.checked_index()?).map(Vec::as_slice)
    }

    /// Cards dealt to `deck`, or `None` for a deck outside the ring.
    #[must_use]
    pub fn deck(&self, deck: DeckId) -> Option<&[Card]> {
        self.decks.get(deck.checked_index()?).map(Vec::as_slice)
    }

    /// Split into (hands, decks).
    #[must_use]
    pub fn into_parts(self) -> (Vec<Vec<Card>>, Vec<Vec<Card>>) {
        (self.hands, self.decks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::cards_from;

    #[test]
    fn test_two_player_alternating_pack() {
        let pack = Pack::from_values(&[1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2]);
        let deal = Deal::new(&pack, 2).unwrap();

        assert_eq!(deal.hand(PlayerId(1)), Some(cards_from(&[1, 1, 1, 1]).as_slice()));
        assert_eq!(deal.hand(PlayerId(2)), Some(cards_from(&[2, 2, 2, 2]).as_slice()));
        assert_eq!(deal.deck(DeckId(1)), Some(cards_from(&[1, 1, 1, 1]).as_slice()));
        assert_eq!(deal.deck(DeckId(2)), Some(cards_from(&[2, 2, 2, 2]).as_slice()));
    }

    #[test]
    fn test_round_robin_order() {
        let values: Vec<u32> = (0..24).collect();
        let deal = Deal::new(&Pack::from_values(&values), 3).unwrap();

        assert_eq!(deal.hand(PlayerId(1)), Some(cards_from(&[0, 3, 6, 9]).as_slice()));
        assert_eq!(deal.hand(PlayerId(3)), Some(cards_from(&[2, 5, 8, 11]).as_slice()));
        assert_eq!(deal.deck(DeckId(1)), Some(cards_from(&[12, 15, 18, 21]).as_slice()));
        assert_eq!(deal.deck(DeckId(2)), Some(cards_from(&[13, 16, 19, 22]).as_slice()));
    }

    #[test]
    fn test_unknown_seats() {
        let values: Vec<u32> = (0..16).collect();
        let deal = Deal::new(&Pack::from_values(&values), 2).unwrap();

        assert_eq!(deal.hand(PlayerId(0)), None);
        assert_eq!(deal.hand(PlayerId(3)), None);
        assert_eq!(deal.deck(DeckId(0)), None);
        assert_eq!(deal.deck(DeckId(3)), None);
    }

    #[test]
    fn test_rejects_wrong_size() {
        let pack = Pack::from_values(&[1; 15]);
        assert!(matches!(Deal::new(&pack, 2), Err(SetupError::PackSize { .. })));
        assert_eq!(Deal::new(&pack, 0), Err(SetupError::NoPlayers));
    }
}
