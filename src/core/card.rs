//! Card values.

use serde::{Deserialize, Serialize};

/// A playing card.
///
/// Cards carry nothing but a non-negative face value. Two cards with the same
/// value are interchangeable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card(pub u32);

impl Card {
    /// Create a card with the given face value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the face value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for Card {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Join cards into a space-separated line, the format used by every trace.
pub fn join_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build a card list from raw values.
pub fn cards_from(values: &[u32]) -> Vec<Card> {
    values.iter().copied().map(Card).collect()
}
