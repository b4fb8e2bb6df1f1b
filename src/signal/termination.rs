//! Game termination signal.
//!
//! The game-over flag is an `AtomicBool` flipped by compare-and-set, which
//! makes it the single source of truth for who won. The completion latch is
//! a separate mutex/condvar pair so a winner can finish its last discard
//! between winning the race and waking the orchestrator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::core::player::PlayerId;

/// Process-wide win/stop coordination.
///
/// ## Usage
///
/// ```
/// use card_ring::core::PlayerId;
/// use card_ring::signal::TerminationSignal;
///
/// let signal = TerminationSignal::new();
/// assert!(signal.try_declare_winner(PlayerId::new(2)));
/// assert!(!signal.try_declare_winner(PlayerId::new(1)));
///
/// signal.wait_for_end(); // already released, returns at once
/// assert_eq!(signal.winner(), Some(PlayerId::new(2)));
/// ```
#[derive(Debug, Default)]
pub struct TerminationSignal {
    over: AtomicBool,
    winner: OnceLock<PlayerId>,
    released: Mutex<bool>,
    ended: Condvar,
}

impl TerminationSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Win the race to end the game.
    ///
    /// Sets the flag and records `player` as winner if nobody has done so
    /// yet. Does not release waiters; call `release` once the winner's last
    /// turn is written.
    pub fn try_claim(&self, player: PlayerId) -> bool {
        if self
            .over
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            let _ = self.winner.set(player);
            log::debug!("{} claimed the win", player);
            true
        } else {
            false
        }
    }

    /// Claim the win and release every thread waiting for the end.
    ///
    /// Returns true for exactly one caller across the whole run.
    pub fn try_declare_winner(&self, player: PlayerId) -> bool {
        if self.try_claim(player) {
            self.release();
            true
        } else {
            false
        }
    }

    /// End the game without a winner. Returns false if it was already over.
    pub fn halt(&self) -> bool {
        let halted = self
            .over
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        self.release();
        halted
    }

    /// Wake everyone blocked in `wait_for_end`. Fires once; later calls are
    /// no-ops.
    pub fn release(&self) {
        let mut released = self.released.lock();
        if !*released {
            *released = true;
            self.ended.notify_all();
        }
    }

    /// Whether the game is over.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.over.load(Ordering::Acquire)
    }

    /// The recorded winner, if any.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner.get().copied()
    }

    /// Block until the latch is released.
    pub fn wait_for_end(&self) {
        let mut released = self.released.lock();
        while !*released {
            self.ended.wait(&mut released);
        }
    }

    /// Block until the latch is released or `timeout` elapses.
    ///
    /// Returns true if the latch was released.
    pub fn wait_for_end_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut released = self.released.lock();
        while !*released {
            if self.ended.wait_until(&mut released, deadline).timed_out() {
                return *released;
            }
        }
        true
    }
}
