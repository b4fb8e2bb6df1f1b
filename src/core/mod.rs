//! Core types: cards, player and deck ids, configuration, errors, RNG.
//!
//! Everything here is plain data. The concurrent pieces live in `deck`,
//! `signal`, `player` and `game`.

pub mod card;
pub mod player;
pub mod config;
pub mod error;
pub mod rng;

pub use card::{cards_from, join_cards, Card};
pub use player::{DeckId, PlayerId};
pub use config::{GameConfig, CARDS_PER_DECK, HAND_SIZE, PACK_CARDS_PER_PLAYER};
pub use error::{Cancelled, ConfigError, GameError, PackError, SetupError};
pub use rng::GameRng;
