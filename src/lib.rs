//! # card-ring
//!
//! A concurrent card-passing game. N players sit in a ring with one deck
//! between each pair of neighbours. Every player draws from the deck on their
//! left and discards to the deck on their right, on their own thread, until
//! someone holds four cards of the same value.
//!
//! ## Design Principles
//!
//! 1. **One lock per deck**: decks are the only state players share with
//!    each other, and each deck guards itself. There is no global lock.
//!
//! 2. **One source of truth for the winner**: a single compare-and-set on
//!    the termination signal decides who won. Nothing else is polled.
//!
//! 3. **Nobody blocks forever**: deck waits are cancellable and worker joins
//!    are bounded, so a ring where everyone waits on an empty deck still
//!    shuts down.
//!
//! ## Modules
//!
//! - `core`: cards, player/deck ids, configuration, errors, RNG
//! - `cards`: pack loading and generation, the deal, hands
//! - `deck`: the blocking deck and post-game rebalancing
//! - `signal`: the termination signal
//! - `player`: the player worker
//! - `trace`: per-player and per-deck trace output
//! - `game`: orchestration, validation, outcome

pub mod core;
pub mod cards;
pub mod deck;
pub mod signal;
pub mod player;
pub mod trace;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Card, DeckId, PlayerId,
    GameConfig, GameRng,
    GameError, SetupError, PackError, ConfigError, Cancelled,
    HAND_SIZE, CARDS_PER_DECK, PACK_CARDS_PER_PLAYER,
};

pub use crate::cards::{Deal, Hand, Pack};

pub use crate::deck::{rebalance, Deck};

pub use crate::signal::TerminationSignal;

pub use crate::player::{Player, PlayerState};

pub use crate::trace::{FileTraces, MemoryTraces, NullTraces, TraceOutput, TraceSink};

pub use crate::game::{
    CardGame, GameOutcome, GameResult,
    ValidationReport, Warning,
};
