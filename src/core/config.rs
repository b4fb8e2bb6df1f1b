//! Game configuration.
//!
//! The rules are fixed (first to hold four equal cards wins), so the
//! configuration only carries the player count and the timing knobs the
//! orchestrator and the workers use:
//! - `turn_pause_ms`: pause after every non-terminal turn
//! - `grace_period_ms`: settle time between the win and deck cancellation
//! - `join_timeout_ms`: how long each worker gets to stop
//! - `game_timeout_ms`: optional bound on the wait for a winner
//!
//! Timings are stored in milliseconds so a config file stays readable.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Cards held by each player at rest.
pub const HAND_SIZE: usize = 4;

/// Cards each deck holds after the deal and after rebalancing.
pub const CARDS_PER_DECK: usize = 4;

/// Pack size per player: one hand plus one deck.
pub const PACK_CARDS_PER_PLAYER: usize = HAND_SIZE + CARDS_PER_DECK;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of players (and decks) in the ring.
    pub player_count: usize,

    /// Pause after each non-terminal turn, so a worker does not spin against
    /// a neighbour blocked on an empty deck.
    pub turn_pause_ms: u64,

    /// Time in-flight turns get to settle after the winner is declared.
    pub grace_period_ms: u64,

    /// Bounded join per worker once decks are cancelled.
    pub join_timeout_ms: u64,

    /// Give up waiting for a winner after this long. `None` waits forever.
    pub game_timeout_ms: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            turn_pause_ms: 10,
            grace_period_ms: 500,
            join_timeout_ms: 500,
            game_timeout_ms: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration for `player_count` players with default timings.
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Set the player count.
    #[must_use]
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    /// Set the pause between turns.
    #[must_use]
    pub fn with_turn_pause(mut self, pause: Duration) -> Self {
        self.turn_pause_ms = pause.as_millis() as u64;
        self
    }

    /// Set the grace period after the winner is declared.
    #[must_use]
    pub fn with_grace_period(mut self, grace: Duration) -> Self {
        self.grace_period_ms = grace.as_millis() as u64;
        self
    }

    /// Set the per-worker join timeout.
    #[must_use]
    pub fn with_join_timeout(mut self, timeout: Duration) -> Self {
        self.join_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Bound the wait for a winner.
    #[must_use]
    pub fn with_game_timeout(mut self, timeout: Duration) -> Self {
        self.game_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    /// Number of cards the pack must contain.
    #[must_use]
    pub fn pack_size(&self) -> usize {
        PACK_CARDS_PER_PLAYER * self.player_count
    }

    #[must_use]
    pub fn turn_pause(&self) -> Duration {
        Duration::from_millis(self.turn_pause_ms)
    }

    #[must_use]
    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.grace_period_ms)
    }

    #[must_use]
    pub fn join_timeout(&self) -> Duration {
        Duration::from_millis(self.join_timeout_ms)
    }

    #[must_use]
    pub fn game_timeout(&self) -> Option<Duration> {
        self.game_timeout_ms.map(Duration::from_millis)
    }
}
