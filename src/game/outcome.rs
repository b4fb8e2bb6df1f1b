//! Result of a finished game.

use serde::{Deserialize, Serialize};

use crate::core::card::Card;
use crate::core::player::{DeckId, PlayerId};
use crate::player::PlayerState;

use super::validator::Warning;

/// How the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Stopped by the game timeout before anyone won.
    Halted,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Halted => false,
        }
    }
}

/// Final state of one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player: PlayerId,
    pub state: PlayerState,
    pub hand: Vec<Card>,
}

/// Final contents of one deck, after rebalancing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSummary {
    pub deck: DeckId,
    pub cards: Vec<Card>,
}

/// Everything a finished game reports back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub result: GameResult,
    pub players: Vec<PlayerSummary>,
    pub decks: Vec<DeckSummary>,
    /// End-state consistency warnings.
    pub warnings: Vec<Warning>,
    /// Trace failures and workers that had to be abandoned.
    pub errors: Vec<String>,
}

impl GameOutcome {
    /// The winner, if the game had one.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.result {
            GameResult::Winner(p) => Some(p),
            GameResult::Halted => None,
        }
    }

    /// Final hand of `player`.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> Option<&[Card]> {
        self.players
            .iter()
            .find(|p| p.player == player)
            .map(|p| p.hand.as_slice())
    }

    /// Final contents of `deck`.
    #[must_use]
    pub fn deck(&self, deck: DeckId) -> Option<&[Card]> {
        self.decks
            .iter()
            .find(|d| d.deck == deck)
            .map(|d| d.cards.as_slice())
    }

    /// True when the end state passed validation and nothing failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }
}
