//! Decks shared between ring neighbours.
//!
//! A `Deck` is a FIFO with a blocking take. Deck `i` sits between player `i`
//! (who draws from it) and player `i - 1` (who discards into it).
//! `rebalance` normalises deck contents once play has stopped.

pub mod queue;
pub mod rebalance;

pub use queue::Deck;
pub use rebalance::rebalance;
