//! Player and deck identification.
//!
//! ## PlayerId / DeckId
//!
//! Type-safe identifiers for the seats and decks around the ring. Both are
//! 1-based, matching the numbering used in trace output: player 1 draws from
//! deck 1 and discards to deck 2.
//!
//! ## Ring topology
//!
//! The ring is fixed once the game is set up. Player `i` draws from deck `i`
//! and discards to deck `(i mod n) + 1`, so the last player feeds deck 1.

use serde::{Deserialize, Serialize};

/// Player identifier. Player numbering starts at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw 1-based id.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the 0-based storage index.
    ///
    /// # Panics
    ///
    /// Panics on id 0, which names no seat. Use `checked_index` for ids that
    /// come from outside the game.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// The 0-based storage index, or `None` for id 0.
    #[must_use]
    pub const fn checked_index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }

    /// The deck this player draws from.
    #[must_use]
    pub const fn source_deck(self) -> DeckId {
        DeckId(self.0)
    }

    /// The deck this player discards to in a ring of `player_count` players.
    #[must_use]
    pub const fn sink_deck(self, player_count: usize) -> DeckId {
        DeckId(self.0 % player_count as u32 + 1)
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use card_ring::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0], PlayerId::new(1));
    /// assert_eq!(players[3], PlayerId::new(4));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (1..=player_count as u32).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// Deck identifier. Deck numbering starts at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckId(pub u32);

impl DeckId {
    /// Create a new deck ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw 1-based id.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the 0-based storage index.
    ///
    /// # Panics
    ///
    /// Panics on id 0, which names no seat. Use `checked_index` for ids that
    /// come from outside the game.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// The 0-based storage index, or `None` for id 0.
    #[must_use]
    pub const fn checked_index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }

    /// Iterate over all deck IDs for a ring of `deck_count` decks.
    pub fn all(deck_count: usize) -> impl Iterator<Item = DeckId> {
        (1..=deck_count as u32).map(DeckId)
    }
}

impl std::fmt::Display for DeckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "deck {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p1 = PlayerId::new(1);
        let p2 = PlayerId::new(2);

        assert_eq!(p1.index(), 0);
        assert_eq!(p2.index(), 1);
        assert_eq!(p2.raw(), 2);
        assert_eq!(format!("{}", p1), "player 1");
    }

    #[test]
    fn test_player_id_all() {
        let players: Vec<_> = PlayerId::all(3).collect();
        assert_eq!(players, vec![PlayerId(1), PlayerId(2), PlayerId(3)]);
    }

    #[test]
    fn test_ring_topology() {
        let n = 4;
        for player in PlayerId::all(n) {
            assert_eq!(player.source_deck(), DeckId(player.raw()));
        }
        assert_eq!(PlayerId(1).sink_deck(n), DeckId(2));
        assert_eq!(PlayerId(3).sink_deck(n), DeckId(4));
        // Last player closes the ring.
        assert_eq!(PlayerId(4).sink_deck(n), DeckId(1));
    }

    #[test]
    fn test_single_player_ring() {
        assert_eq!(PlayerId(1).source_deck(), DeckId(1));
        assert_eq!(PlayerId(1).sink_deck(1), DeckId(1));
    }

    #[test]
    fn test_deck_id() {
        let deck = DeckId::new(3);
        assert_eq!(deck.index(), 2);
        assert_eq!(format!("{}", deck), "deck 3");
        assert_eq!(DeckId::all(2).collect::<Vec<_>>(), vec![DeckId(1), DeckId(2)]);
    }

    #[test]
    fn test_checked_index() {
        assert_eq!(PlayerId(1).checked_index(), Some(0));
        assert_eq!(PlayerId(0).checked_index(), None);
        assert_eq!(DeckId(4).checked_index(), Some(3));
        assert_eq!(DeckId(0).checked_index(), None);
    }

    #[test]
    fn test_id_serialization() {
        let json = serde_json::to_string(&PlayerId(2)).unwrap();
        assert_eq!(json, "2");
        let back: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PlayerId(2));
    }
}
