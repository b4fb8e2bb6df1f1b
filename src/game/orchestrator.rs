//! Game orchestration: build the ring, run the workers, wind everything down.
//!
//! ## Lifecycle
//!
//! 1. `setup`: validate the pack, deal, build decks and players
//! 2. `run`: spawn one worker per player and wait for the signal
//! 3. After the signal: grace period, cancel deck waits, bounded joins
//! 4. Rebalance decks, validate, write the deck traces
//!
//! The orchestrator never touches a hand or a deck while workers are
//! playing.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::cards::{Deal, Hand, Pack};
use crate::core::card::Card;
use crate::core::config::{GameConfig, HAND_SIZE};
use crate::core::error::{GameError, SetupError};
use crate::core::player::{DeckId, PlayerId};
use crate::deck::{rebalance, Deck};
use crate::player::{Player, PlayerState};
use crate::signal::TerminationSignal;
use crate::trace::{TraceOutput, TraceSink};

use super::outcome::{DeckSummary, GameOutcome, GameResult, PlayerSummary};
use super::validator::{self, ValidationReport};

/// How often a bounded join checks whether a worker has finished.
const JOIN_POLL: Duration = Duration::from_millis(5);

type Worker = (PlayerId, JoinHandle<io::Result<PlayerState>>);

/// A ring of players and decks, ready to play once.
pub struct CardGame {
    config: GameConfig,
    pack: Pack,
    decks: Vec<Arc<Deck>>,
    players: Vec<Arc<Player>>,
    signal: Arc<TerminationSignal>,
    traces: Arc<dyn TraceOutput>,
    started: bool,
}

impl CardGame {
    /// Deal `pack` and seat `config.player_count` players around a ring.
    ///
    /// Opens every player trace before writing any initial hand. Nothing is
    /// opened if validation fails, and if one trace cannot be opened the
    /// others are abandoned again.
    pub fn setup(
        pack: Pack,
        config: GameConfig,
        traces: impl TraceOutput + 'static,
    ) -> Result<Self, GameError> {
        let n = config.player_count;
        let deal = Deal::new(&pack, n)?;
        let (hands, deck_cards) = deal.into_parts();

        for (player, hand) in PlayerId::all(n).zip(&hands) {
            if hand.len() != HAND_SIZE {
                return Err(SetupError::HandSize {
                    player,
                    expected: HAND_SIZE,
                    found: hand.len(),
                }
                .into());
            }
        }

        let traces: Arc<dyn TraceOutput> = Arc::new(traces);
        let signal = Arc::new(TerminationSignal::new());
        let decks: Vec<Arc<Deck>> = DeckId::all(n)
            .zip(deck_cards)
            .map(|(id, cards)| Arc::new(Deck::with_cards(id, cards)))
            .collect();

        let sinks = open_player_sinks(traces.as_ref(), n)?;

        let mut players = Vec::with_capacity(n);
        for ((id, hand), sink) in PlayerId::all(n).zip(hands).zip(sinks) {
            let left = Arc::clone(&decks[id.source_deck().index()]);
            let right = Arc::clone(&decks[id.sink_deck(n).index()]);
            let player = Player::new(id, hand, left, right, Arc::clone(&signal), sink)?
                .with_turn_pause(config.turn_pause());
            players.push(Arc::new(player));
        }

        log::info!("dealt {} cards to {} players", pack.len(), n);

        Ok(Self {
            config,
            pack,
            decks,
            players,
            signal,
            traces,
            started: false,
        })
    }

    /// Play the game to its end.
    ///
    /// Can only be called once.
    pub fn run(&mut self) -> Result<GameOutcome, GameError> {
        if self.started {
            return Err(GameError::AlreadyStarted);
        }
        self.started = true;

        let workers = self.start_workers()?;
        log::info!("started {} player workers", workers.len());

        self.await_end();
        thread::sleep(self.config.grace_period());
        self.cancel_decks();
        let mut errors = self.join_workers(workers);

        self.rebalance_decks();
        let report = self.validate();
        errors.extend(self.write_deck_traces());

        match self.signal.winner() {
            Some(winner) => log::info!("game over: {} won", winner),
            None => log::warn!("game over without a winner"),
        }
        Ok(self.outcome(report, errors))
    }

    fn start_workers(&self) -> Result<Vec<Worker>, GameError> {
        let mut workers = Vec::with_capacity(self.players.len());
        for player in &self.players {
            match player.spawn() {
                Ok(handle) => workers.push((player.id(), handle)),
                Err(source) => {
                    log::error!("failed to start {}: {}", player.id(), source);
                    self.signal.halt();
                    self.cancel_decks();
                    self.join_workers(workers);
                    return Err(GameError::Spawn {
                        player: player.id(),
                        source,
                    });
                }
            }
        }
        Ok(workers)
    }

    fn await_end(&self) {
        match self.config.game_timeout() {
            Some(timeout) => {
                if !self.signal.wait_for_end_timeout(timeout) && self.signal.halt() {
                    log::warn!("no winner after {:?}, halting", timeout);
                }
            }
            None => self.signal.wait_for_end(),
        }
    }

    fn cancel_decks(&self) {
        for deck in &self.decks {
            deck.cancel();
        }
    }

    /// Join each worker, giving each up to `join_timeout`. Workers that do
    /// not stop in time are detached.
    fn join_workers(&self, workers: Vec<Worker>) -> Vec<String> {
        let timeout = self.config.join_timeout();
        let mut errors = Vec::new();

        for (id, handle) in workers {
            let deadline = Instant::now() + timeout;
            while !handle.is_finished() && Instant::now() < deadline {
                thread::sleep(JOIN_POLL);
            }
            if !handle.is_finished() {
                log::warn!("{} did not stop within {:?}, abandoning it", id, timeout);
                errors.push(format!("{} did not stop within {:?}", id, timeout));
                continue;
            }
            match handle.join() {
                Ok(Ok(state)) => log::debug!("{} stopped as {:?}", id, state),
                Ok(Err(e)) => {
                    log::error!("{} trace output failed: {}", id, e);
                    errors.push(format!("{} trace output failed: {}", id, e));
                }
                Err(_) => {
                    log::error!("{} worker panicked", id);
                    errors.push(format!("{} worker panicked", id));
                }
            }
        }
        errors
    }

    /// Pool, sort and redistribute the remaining deck cards.
    ///
    /// Only correct once every worker has stopped.
    pub fn rebalance_decks(&self) {
        rebalance(&self.decks);
    }

    /// Check the current hands and decks against the pack.
    pub fn validate(&self) -> ValidationReport {
        validator::validate(&self.pack, &self.decks, &self.players)
    }

    fn write_deck_traces(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for deck in &self.decks {
            let written = self.traces.deck_sink(deck.id()).and_then(|mut sink| {
                sink.write_line(&deck.contents_line())?;
                sink.flush()
            });
            if let Err(e) = written {
                log::error!("{} trace output failed: {}", deck.id(), e);
                errors.push(format!("{} trace output failed: {}", deck.id(), e));
            }
        }
        errors
    }

    fn outcome(&self, report: ValidationReport, errors: Vec<String>) -> GameOutcome {
        let result = match self.signal.winner() {
            Some(winner) => GameResult::Winner(winner),
            None => GameResult::Halted,
        };
        GameOutcome {
            result,
            players: self
                .players
                .iter()
                .map(|player| PlayerSummary {
                    player: player.id(),
                    state: player.state(),
                    hand: player.hand().to_vec(),
                })
                .collect(),
            decks: self
                .decks
                .iter()
                .map(|deck| DeckSummary {
                    deck: deck.id(),
                    cards: deck.snapshot(),
                })
                .collect(),
            warnings: report.warnings,
            errors,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn pack(&self) -> &Pack {
        &self.pack
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn deck_count(&self) -> usize {
        self.decks.len()
    }

    #[must_use]
    pub fn players(&self) -> &[Arc<Player>] {
        &self.players
    }

    #[must_use]
    pub fn decks(&self) -> &[Arc<Deck>] {
        &self.decks
    }

    /// Copy of a player's hand, or `None` for an unknown player.
    #[must_use]
    pub fn player_hand(&self, player: PlayerId) -> Option<Hand> {
        self.player(player).map(|p| p.hand())
    }

    /// Copy of a deck's contents, or `None` for an unknown deck.
    #[must_use]
    pub fn deck_contents(&self, deck: DeckId) -> Option<Vec<Card>> {
        self.deck(deck).map(|d| d.snapshot())
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&Arc<Player>> {
        self.players.get(player.checked_index()?)
    }

    #[must_use]
    pub fn deck(&self, deck: DeckId) -> Option<&Arc<Deck>> {
        self.decks.get(deck.checked_index()?)
    }

    #[must_use]
    pub fn signal(&self) -> &Arc<TerminationSignal> {
        &self.signal
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.signal.winner()
    }
}

/// Open every player trace, or none: on failure the sinks already opened
/// are abandoned before the error is returned.
fn open_player_sinks(
    traces: &dyn TraceOutput,
    player_count: usize,
) -> io::Result<Vec<Box<dyn TraceSink>>> {
    let mut sinks = Vec::with_capacity(player_count);
    for id in PlayerId::all(player_count) {
        match traces.player_sink(id) {
            Ok(sink) => sinks.push(sink),
            Err(e) => {
                log::error!("cannot open trace for {}: {}", id, e);
                for mut sink in sinks {
                    if let Err(undo) = sink.abandon() {
                        log::warn!("failed to clean up trace: {}", undo);
                    }
                }
                return Err(e);
            }
        }
    }
    Ok(sinks)
}

impl std::fmt::Debug for CardGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardGame")
            .field("config", &self.config)
            .field("players", &self.players)
            .field("decks", &self.decks)
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}
