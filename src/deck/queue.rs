//! Blocking FIFO deck shared by two neighbouring players.
//!
//! The player on the left puts cards at the bottom, the player on the right
//! takes them from the top. `take` waits on a condition variable while the
//! deck is empty; `cancel` wakes every waiter so nobody stays blocked once
//! the game is over.
//!
//! All operations on one deck go through its own mutex. Separate decks share
//! nothing.

use std::collections::VecDeque;

use parking_lot::{Condvar, Mutex};

use crate::core::card::Card;
use crate::core::error::Cancelled;
use crate::core::player::DeckId;

#[derive(Debug, Default)]
struct DeckState {
    cards: VecDeque<Card>,
    cancelled: bool,
}

/// A deck of cards with a blocking, cancellable take.
///
/// ## Usage
///
/// ```
/// use card_ring::core::{Card, DeckId};
/// use card_ring::deck::Deck;
///
/// let deck = Deck::new(DeckId::new(1));
/// deck.put(Card::new(5));
/// deck.put(Card::new(7));
///
/// assert_eq!(deck.take(), Ok(Card::new(5)));
/// assert_eq!(deck.snapshot(), vec![Card::new(7)]);
/// ```
#[derive(Debug)]
pub struct Deck {
    id: DeckId,
    state: Mutex<DeckState>,
    available: Condvar,
}

impl Deck {
    /// Create an empty deck.
    #[must_use]
    pub fn new(id: DeckId) -> Self {
        Self {
            id,
            state: Mutex::new(DeckState::default()),
            available: Condvar::new(),
        }
    }

    /// Create a deck holding `cards`, first card on top.
    #[must_use]
    pub fn with_cards(id: DeckId, cards: impl IntoIterator<Item = Card>) -> Self {
        let deck = Self::new(id);
        deck.state.lock().cards.extend(cards);
        deck
    }

    #[must_use]
    pub fn id(&self) -> DeckId {
        self.id
    }

    /// Add a card to the bottom. Never blocks.
    pub fn put(&self, card: Card) {
        let mut state = self.state.lock();
        state.cards.push_back(card);
        self.available.notify_one();
    }

    /// Remove the top card, waiting while the deck is empty.
    ///
    /// Returns `Cancelled` once `cancel` has been called, even if cards
    /// remain.
    pub fn take(&self) -> Result<Card, Cancelled> {
        let mut state = self.state.lock();
        loop {
            if state.cancelled {
                return Err(Cancelled(self.id));
            }
            if let Some(card) = state.cards.pop_front() {
                return Ok(card);
            }
            self.available.wait(&mut state);
        }
    }

    /// Remove the top card without waiting.
    pub fn try_take(&self) -> Option<Card> {
        let mut state = self.state.lock();
        if state.cancelled {
            return None;
        }
        state.cards.pop_front()
    }

    /// Cancel every current and future wait on this deck.
    pub fn cancel(&self) {
        let mut state = self.state.lock();
        if !state.cancelled {
            state.cancelled = true;
            log::debug!("{} cancelled", self.id);
        }
        self.available.notify_all();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.state.lock().cancelled
    }

    /// Copy of the current contents, top first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Card> {
        self.state.lock().cards.iter().copied().collect()
    }

    /// Remove and return every card, top first.
    pub fn drain(&self) -> Vec<Card> {
        self.state.lock().cards.drain(..).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().cards.is_empty()
    }

    /// The final trace line: `deckN contents: v1 v2 ...`.
    #[must_use]
    pub fn contents_line(&self) -> String {
        let state = self.state.lock();
        let mut line = format!("deck{} contents:", self.id.raw());
        for card in &state.cards {
            line.push(' ');
            line.push_str(&card.to_string());
        }
        line
    }
}
