//! Error types.
//!
//! Setup errors are returned before any worker exists. Runtime problems inside
//! a worker (trace I/O) are collected and surfaced through the game outcome,
//! never propagated across threads as panics.

use thiserror::Error;

use super::player::{DeckId, PlayerId};

/// Rejected game setup. No worker has been started when one of these is
/// returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("number of players must be positive")]
    NoPlayers,
    #[error("pack must contain exactly {expected} cards for {players} players (found {found})")]
    PackSize {
        players: usize,
        expected: usize,
        found: usize,
    },
    #[error("initial hand of {player} must contain exactly {expected} cards (found {found})")]
    HandSize {
        player: PlayerId,
        expected: usize,
        found: usize,
    },
}

/// Malformed pack source.
#[derive(Error, Debug)]
pub enum PackError {
    #[error("failed to read pack: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid number at line {line}: {text:?}")]
    InvalidNumber { line: usize, text: String },
    #[error("negative number found at line {line}")]
    Negative { line: usize },
}

/// Unreadable configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// A blocking take that was woken by cancellation instead of a card.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("wait on {0} was cancelled")]
pub struct Cancelled(pub DeckId);

/// Top-level error for running a game.
#[derive(Error, Debug)]
pub enum GameError {
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error(transparent)]
    Pack(#[from] PackError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to start worker for {player}: {source}")]
    Spawn {
        player: PlayerId,
        source: std::io::Error,
    },
    #[error("game has already been run")]
    AlreadyStarted,
}
