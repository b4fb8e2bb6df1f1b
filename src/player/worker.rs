//! The player worker: draw, check, discard until the game is over.
//!
//! ## Turn
//!
//! 1. Take the top card of the left deck (blocks while it is empty)
//! 2. If the five-card hand holds four of a kind, race for the win
//! 3. Pass one card to the right deck
//!
//! The loop only looks at the termination flag between turns. A worker
//! blocked in `take` when the game ends is released by deck cancellation.
//!
//! ## Ownership
//!
//! A `Player` is shared (`Arc`) between its worker thread and the
//! orchestrator, but only the worker writes the hand. The hand lock is never
//! held across a blocking take or a trace write, so the orchestrator can read
//! the hand even of a worker it had to abandon.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::cards::Hand;
use crate::core::card::Card;
use crate::core::config::HAND_SIZE;
use crate::core::error::SetupError;
use crate::core::player::PlayerId;
use crate::deck::Deck;
use crate::signal::TerminationSignal;
use crate::trace::TraceSink;

use super::journal::Journal;

/// Lifecycle of a player worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// Constructed, worker not started.
    Idle,
    /// Taking turns.
    Playing,
    /// Won the game.
    Won,
    /// Stopped without winning.
    Exited,
}

/// What a single turn ended with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Turn {
    Continue,
    Won,
    Cancelled,
}

/// One seat at the table.
pub struct Player {
    id: PlayerId,
    hand: Mutex<Hand>,
    left: Arc<Deck>,
    right: Arc<Deck>,
    signal: Arc<TerminationSignal>,
    journal: Mutex<Journal>,
    state: Mutex<PlayerState>,
    exited: AtomicBool,
    turn_pause: Duration,
}

impl Player {
    /// Seat a player with a freshly dealt hand.
    ///
    /// The hand must hold exactly `HAND_SIZE` cards. Writes the
    /// `initial hand` trace line.
    pub fn new(
        id: PlayerId,
        hand: Vec<Card>,
        left: Arc<Deck>,
        right: Arc<Deck>,
        signal: Arc<TerminationSignal>,
        sink: Box<dyn TraceSink>,
    ) -> Result<Self, SetupError> {
        if hand.len() != HAND_SIZE {
            return Err(SetupError::HandSize {
                player: id,
                expected: HAND_SIZE,
                found: hand.len(),
            });
        }

        let hand = Hand::new(hand);
        let mut journal = Journal::new(sink);
        journal.line(&format!("player {} initial hand {}", id.raw(), hand));

        Ok(Self {
            id,
            hand: Mutex::new(hand),
            left,
            right,
            signal,
            journal: Mutex::new(journal),
            state: Mutex::new(PlayerState::Idle),
            exited: AtomicBool::new(false),
            turn_pause: Duration::from_millis(10),
        })
    }

    /// Set the pause between turns.
    #[must_use]
    pub fn with_turn_pause(mut self, pause: Duration) -> Self {
        self.turn_pause = pause;
        self
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Copy of the current hand.
    #[must_use]
    pub fn hand(&self) -> Hand {
        self.hand.lock().clone()
    }

    #[must_use]
    pub fn state(&self) -> PlayerState {
        *self.state.lock()
    }

    /// Deck this player draws from.
    #[must_use]
    pub fn left_deck(&self) -> &Arc<Deck> {
        &self.left
    }

    /// Deck this player discards to.
    #[must_use]
    pub fn right_deck(&self) -> &Arc<Deck> {
        &self.right
    }

    /// Whether the current hand holds four of a kind.
    #[must_use]
    pub fn check_winning_hand(&self) -> bool {
        self.hand.lock().is_winning()
    }

    /// The card this player would pass on right now.
    #[must_use]
    pub fn select_card_to_discard(&self) -> Card {
        self.hand.lock().select_discard(self.id)
    }

    /// Start the worker on its own named thread.
    pub fn spawn(self: &Arc<Self>) -> io::Result<JoinHandle<io::Result<PlayerState>>> {
        let player = Arc::clone(self);
        thread::Builder::new()
            .name(format!("player-{}", self.id.raw()))
            .spawn(move || player.run())
    }

    /// Play until the game is over.
    ///
    /// Returns the final state, or the first trace I/O error the worker hit.
    /// Trace errors never cut play short.
    pub fn run(&self) -> io::Result<PlayerState> {
        self.set_state(PlayerState::Playing);
        log::debug!("{} started with {}", self.id, self.hand());

        if self.check_winning_hand() && self.signal.try_claim(self.id) {
            self.announce_win(&self.hand());
            self.signal.release();
            return self.finish();
        }

        while !self.signal.is_over() {
            match self.take_turn() {
                Turn::Continue => thread::sleep(self.turn_pause),
                Turn::Won => {
                    self.signal.release();
                    return self.finish();
                }
                Turn::Cancelled => break,
            }
        }

        self.exit();
        self.finish()
    }

    fn take_turn(&self) -> Turn {
        let card = match self.left.take() {
            Ok(card) => card,
            Err(cancelled) => {
                log::debug!("{} stops: {}", self.id, cancelled);
                return Turn::Cancelled;
            }
        };

        // Trace lines are written only after the hand lock is released.
        let (won, discarded, hand) = {
            let mut hand = self.hand.lock();
            hand.push(card);
            let won = hand.is_winning() && self.signal.try_claim(self.id);
            let discarded = hand.select_discard(self.id);
            hand.remove_first(discarded);
            self.right.put(discarded);
            (won, discarded, hand.clone())
        };

        self.trace(&format!(
            "player {} draws a {} from deck {}",
            self.id.raw(),
            card,
            self.left.id().raw()
        ));
        self.trace(&format!(
            "player {} discards a {} to deck {}",
            self.id.raw(),
            discarded,
            self.right.id().raw()
        ));

        if won {
            self.announce_win(&hand);
            return Turn::Won;
        }
        self.trace(&format!("player {} current hand is {}", self.id.raw(), hand));
        Turn::Continue
    }

    fn announce_win(&self, hand: &Hand) {
        log::info!("{} wins", self.id);
        self.trace(&format!("player {} wins", self.id.raw()));
        self.write_exit(hand);
        self.set_state(PlayerState::Won);
    }

    fn exit(&self) {
        self.write_exit(&self.hand());
        if self.state() != PlayerState::Won {
            self.set_state(PlayerState::Exited);
        }
    }

    /// Exit lines are written once, whichever path gets here first.
    fn write_exit(&self, hand: &Hand) {
        if self.exited.swap(true, Ordering::AcqRel) {
            return;
        }
        self.trace(&format!("player {} exits", self.id.raw()));
        self.trace(&format!("player {} final hand: {}", self.id.raw(), hand));
    }

    fn finish(&self) -> io::Result<PlayerState> {
        let mut journal = self.journal.lock();
        journal.flush();
        let state = self.state();
        log::debug!("{} finished as {:?}", self.id, state);
        match journal.take_error() {
            Some(e) => Err(e),
            None => Ok(state),
        }
    }

    fn trace(&self, line: &str) {
        self.journal.lock().line(line);
    }

    fn set_state(&self, state: PlayerState) {
        *self.state.lock() = state;
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("id", &self.id)
            .field("left", &self.left.id())
            .field("right", &self.right.id())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
