//! Post-game redistribution of deck contents.
//!
//! Leftover cards are pooled, sorted, and dealt back so the final deck
//! traces are reproducible. This is presentation only and must not run while
//! any worker can still take from a deck.

use std::sync::Arc;

use crate::core::card::Card;
use crate::core::config::CARDS_PER_DECK;

use super::queue::Deck;

/// Pool, sort and redistribute the cards of `decks`.
///
/// `total / n` full rounds are dealt round-robin first. Left-over cards then
/// go round-robin to decks still under `CARDS_PER_DECK`; once every deck is
/// at that size the rest are dealt round-robin over all decks.
///
/// Precondition: no worker is using any of the decks.
pub fn rebalance(decks: &[Arc<Deck>]) {
    if decks.is_empty() {
        return;
    }

    let mut pool: Vec<Card> = decks.iter().flat_map(|deck| deck.drain()).collect();
    pool.sort_unstable();

    let n = decks.len();
    let rounds = pool.len() / n;
    let mut cards = pool.into_iter();

    for _ in 0..rounds {
        for deck in decks {
            if let Some(card) = cards.next() {
                deck.put(card);
            }
        }
    }

    let mut rest = cards.peekable();
    while rest.peek().is_some() {
        let under_target = decks.iter().any(|deck| deck.len() < CARDS_PER_DECK);
        for deck in decks {
            if under_target && deck.len() >= CARDS_PER_DECK {
                continue;
            }
            match rest.next() {
                Some(card) => deck.put(card),
                None => break,
            }
        }
    }

    log::debug!("rebalanced {} decks", n);
}
