//! End-to-end game tests.
//!
//! These tests run whole games through `CardGame` and check the outcome,
//! the traces each player and deck leaves behind, and that every game shuts
//! down even when nobody can win.

use std::io;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use proptest::prelude::*;

use card_ring::{
    Card, CardGame, Deck, DeckId, FileTraces, GameConfig, GameError, GameResult, GameRng,
    MemoryTraces, NullTraces, Pack, Player, PlayerId, PlayerState, SetupError, TerminationSignal,
    TraceOutput, TraceSink, Warning,
};

fn fast_config(player_count: usize) -> GameConfig {
    GameConfig::new(player_count)
        .with_turn_pause(Duration::from_millis(1))
        .with_grace_period(Duration::from_millis(20))
        .with_join_timeout(Duration::from_millis(500))
        .with_game_timeout(Duration::from_secs(20))
}

fn alternating_pack() -> Pack {
    Pack::from_values(&[1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2])
}

fn cards(values: &[u32]) -> Vec<Card> {
    values.iter().copied().map(Card).collect()
}

// =============================================================================
// Two-player scenario
// =============================================================================

/// Test that two players dealt four of a kind produce exactly one winner
/// and nobody draws.
#[test]
fn test_two_initial_winners_one_wins() {
    let traces = MemoryTraces::new();
    let mut game = CardGame::setup(alternating_pack(), fast_config(2), traces.clone()).unwrap();
    let outcome = game.run().unwrap();

    let winner = outcome.winner().expect("someone wins");
    assert!(winner == PlayerId(1) || winner == PlayerId(2));
    assert_eq!(outcome.hand(PlayerId(1)), Some(cards(&[1, 1, 1, 1]).as_slice()));
    assert_eq!(outcome.hand(PlayerId(2)), Some(cards(&[2, 2, 2, 2]).as_slice()));
    assert!(outcome.is_clean(), "{:?}", outcome);

    for player in PlayerId::all(2) {
        let lines = traces.player_lines(player);
        assert!(lines.iter().all(|line| !line.contains("draws")), "{:?}", lines);
        assert_eq!(lines.last().map(String::as_str), Some(match player.raw() {
            1 => "player 1 final hand: 1 1 1 1",
            _ => "player 2 final hand: 2 2 2 2",
        }));
    }

    let winner_lines = traces.player_lines(winner);
    assert_eq!(winner_lines[1], format!("player {} wins", winner.raw()));
    let loser = PlayerId(3 - winner.raw());
    assert!(!traces
        .player_lines(loser)
        .iter()
        .any(|line| line.ends_with("wins")));

    let expected = outcome
        .players
        .iter()
        .find(|summary| summary.player == winner)
        .map(|summary| summary.state);
    assert_eq!(expected, Some(PlayerState::Won));
}

/// Test that deck traces hold the rebalanced contents.
#[test]
fn test_deck_traces_after_rebalance() {
    let traces = MemoryTraces::new();
    let mut game = CardGame::setup(alternating_pack(), fast_config(2), traces.clone()).unwrap();
    let outcome = game.run().unwrap();

    // Nobody drew, so the pool is 1 1 1 1 2 2 2 2 dealt round-robin.
    assert_eq!(outcome.deck(DeckId(1)), Some(cards(&[1, 1, 2, 2]).as_slice()));
    assert_eq!(outcome.deck(DeckId(2)), Some(cards(&[1, 1, 2, 2]).as_slice()));
    assert_eq!(traces.deck_lines(DeckId(1)), vec!["deck1 contents: 1 1 2 2"]);
    assert_eq!(traces.deck_lines(DeckId(2)), vec!["deck2 contents: 1 1 2 2"]);
}

// =============================================================================
// Full games
// =============================================================================

/// Test that generated packs play to a consistent end for several sizes.
#[test]
fn test_generated_games_conserve_cards() {
    for (players, seed) in [(3, 1), (4, 2), (5, 3)] {
        let pack = Pack::generate(players, &mut GameRng::new(seed));
        let mut game = CardGame::setup(pack, fast_config(players), NullTraces).unwrap();
        let outcome = game.run().unwrap();

        assert!(
            outcome.warnings.iter().all(|warning| !matches!(
                warning,
                Warning::CardCount { .. } | Warning::CardMultiplicity { .. }
            )),
            "{} players: {:?}",
            players,
            outcome.warnings
        );
        assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
        if let GameResult::Winner(winner) = outcome.result {
            let hand = outcome.hand(winner).unwrap();
            assert!(hand.iter().all(|card| *card == hand[0]), "{:?}", hand);
        }
    }
}

/// Test that a game nobody can win stops at the game timeout.
#[test]
fn test_unwinnable_game_halts_at_timeout() {
    let values: Vec<u32> = (1..=16).collect();
    let config = fast_config(2).with_game_timeout(Duration::from_millis(100));
    let mut game = CardGame::setup(Pack::from_values(&values), config, NullTraces).unwrap();

    let started = Instant::now();
    let outcome = game.run().unwrap();

    assert_eq!(outcome.result, GameResult::Halted);
    assert_eq!(outcome.winner(), None);
    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(outcome.is_clean(), "{:?}", outcome);
    assert!(outcome
        .players
        .iter()
        .all(|summary| summary.state == PlayerState::Exited));
}

// =============================================================================
// Setup
// =============================================================================

/// Test that bad packs are rejected before anything starts.
#[test]
fn test_setup_rejects_wrong_pack_size() {
    let traces = MemoryTraces::new();
    let pack = Pack::from_values(&[1; 15]);
    let err = CardGame::setup(pack, fast_config(2), traces.clone()).unwrap_err();

    match err {
        GameError::Setup(SetupError::PackSize {
            players,
            expected,
            found,
        }) => assert_eq!((players, expected, found), (2, 16, 15)),
        other => panic!("unexpected error: {}", other),
    }
    assert!(traces.player_lines(PlayerId(1)).is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: any valid pack deals round-robin into a closed ring.
    #[test]
    fn prop_setup_deals_round_robin(players in 1usize..9, seed in any::<u64>()) {
        let pack = Pack::generate(players, &mut GameRng::new(seed));
        let traces = MemoryTraces::new();
        let game = CardGame::setup(pack.clone(), GameConfig::new(players), traces.clone()).unwrap();

        prop_assert_eq!(game.player_count(), players);
        prop_assert_eq!(game.deck_count(), players);

        for player in PlayerId::all(players) {
            let i = player.index();
            let expected: Vec<Card> = (0..4).map(|k| pack.cards()[i + k * players]).collect();
            let hand = game.player_hand(player).unwrap();
            prop_assert_eq!(hand.cards(), expected.as_slice());

            let seat = game.player(player).unwrap();
            prop_assert_eq!(seat.left_deck().id(), DeckId(player.raw()));
            prop_assert_eq!(seat.right_deck().id(), DeckId(player.raw() % players as u32 + 1));

            let first = traces.player_lines(player);
            prop_assert_eq!(first.len(), 1);
            let prefix = format!("player {} initial hand ", player.raw());
            prop_assert!(first[0].starts_with(&prefix));
        }

        for deck in DeckId::all(players) {
            let i = deck.index();
            let expected: Vec<Card> =
                (0..4).map(|k| pack.cards()[4 * players + i + k * players]).collect();
            prop_assert_eq!(game.deck_contents(deck), Some(expected));
        }
    }
}

// =============================================================================
// Cancellation
// =============================================================================

/// Test that a worker blocked on an empty deck stops once the deck is
/// cancelled.
#[test]
fn test_blocked_worker_stops_on_cancel() {
    let left = Arc::new(Deck::new(DeckId(1)));
    let right = Arc::new(Deck::new(DeckId(2)));
    let signal = Arc::new(TerminationSignal::new());
    let player = Arc::new(
        Player::new(
            PlayerId(1),
            cards(&[1, 2, 3, 4]),
            Arc::clone(&left),
            Arc::clone(&right),
            Arc::clone(&signal),
            NullTraces.player_sink(PlayerId(1)).unwrap(),
        )
        .unwrap(),
    );

    let worker = player.spawn().unwrap();
    thread::sleep(Duration::from_millis(20));
    assert!(!worker.is_finished());

    assert!(signal.halt());
    left.cancel();

    let deadline = Instant::now() + Duration::from_millis(500);
    while !worker.is_finished() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(1));
    }
    assert!(worker.is_finished());
    assert_eq!(worker.join().unwrap().unwrap(), PlayerState::Exited);
    assert_eq!(player.hand().cards(), cards(&[1, 2, 3, 4]).as_slice());
}

// =============================================================================
// Trace output
// =============================================================================

/// Sink whose writes fail once the initial hand has been written.
struct FlakySink {
    written: usize,
}

impl TraceSink for FlakySink {
    fn write_line(&mut self, _line: &str) -> io::Result<()> {
        self.written += 1;
        if self.written > 1 {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct FlakyTraces;

impl TraceOutput for FlakyTraces {
    fn player_sink(&self, _player: PlayerId) -> io::Result<Box<dyn TraceSink>> {
        Ok(Box::new(FlakySink { written: 0 }))
    }

    fn deck_sink(&self, _deck: DeckId) -> io::Result<Box<dyn TraceSink>> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    }
}

/// Test that trace failures are reported in the outcome and do not stop
/// the game.
#[test]
fn test_trace_failures_are_reported() {
    let mut game = CardGame::setup(alternating_pack(), fast_config(2), FlakyTraces).unwrap();
    let outcome = game.run().unwrap();

    assert!(outcome.winner().is_some());
    assert!(!outcome.is_clean());
    // The winner fails writing its win lines; both deck traces fail to open.
    assert!(outcome
        .errors
        .iter()
        .any(|error| error.contains("disk full")));
    assert_eq!(
        outcome
            .errors
            .iter()
            .filter(|error| error.contains("read-only"))
            .count(),
        2
    );
}

/// Test that file traces end up with the expected names and lines.
#[test]
fn test_file_traces_end_to_end() {
    let dir = std::env::temp_dir().join(format!("card-ring-game-{}", std::process::id()));
    let traces = FileTraces::new(&dir).unwrap();
    let mut game = CardGame::setup(alternating_pack(), fast_config(2), traces.clone()).unwrap();
    let outcome = game.run().unwrap();
    let winner = outcome.winner().unwrap();

    let player_text = std::fs::read_to_string(traces.player_path(winner)).unwrap();
    let lines: Vec<&str> = player_text.lines().collect();
    let n = winner.raw();
    assert_eq!(lines[1], format!("player {} wins", n));
    assert_eq!(lines[2], format!("player {} exits", n));

    for deck in DeckId::all(2) {
        let text = std::fs::read_to_string(traces.deck_path(deck)).unwrap();
        assert_eq!(text, format!("deck{} contents: 1 1 2 2\n", deck.raw()));
    }

    std::fs::remove_dir_all(&dir).unwrap();
}

/// Sink that stalls on `exits` unless its player has just won.
struct StallingSink {
    won: bool,
    stall: Duration,
}

impl TraceSink for StallingSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        if line.ends_with(" wins") {
            self.won = true;
        }
        if line.ends_with(" exits") && !self.won {
            thread::sleep(self.stall);
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct StallingTraces {
    stall: Duration,
}

impl TraceOutput for StallingTraces {
    fn player_sink(&self, _player: PlayerId) -> io::Result<Box<dyn TraceSink>> {
        Ok(Box::new(StallingSink {
            won: false,
            stall: self.stall,
        }))
    }

    fn deck_sink(&self, deck: DeckId) -> io::Result<Box<dyn TraceSink>> {
        NullTraces.deck_sink(deck)
    }
}

/// Test that a worker stuck in a trace write is abandoned at the join
/// timeout and does not hold up the end of the game.
#[test]
fn test_stalled_worker_is_abandoned() {
    let config = fast_config(2).with_join_timeout(Duration::from_millis(50));
    let traces = StallingTraces {
        stall: Duration::from_secs(3),
    };
    let mut game = CardGame::setup(alternating_pack(), config, traces).unwrap();

    let started = Instant::now();
    let outcome = game.run().unwrap();
    let elapsed = started.elapsed();

    let winner = outcome.winner().expect("someone wins");
    let loser = PlayerId(3 - winner.raw());
    assert!(elapsed < Duration::from_millis(1_000), "run took {:?}", elapsed);
    assert_eq!(outcome.errors.len(), 1, "{:?}", outcome.errors);
    assert!(outcome.errors[0].contains(&format!("{} did not stop within", loser)));

    // The abandoned player's hand is still reported.
    assert_eq!(
        outcome.hand(loser).map(<[Card]>::len),
        Some(4),
        "{:?}",
        outcome.players
    );
}

/// Test that a setup which cannot open every player trace leaves no trace
/// files behind.
#[test]
fn test_failed_setup_leaves_no_traces() {
    let dir = std::env::temp_dir().join(format!("card-ring-setup-{}", std::process::id()));
    let traces = FileTraces::new(&dir).unwrap();
    // A directory where player 2's trace should go makes opening it fail.
    std::fs::create_dir_all(traces.player_path(PlayerId(2))).unwrap();

    let err = CardGame::setup(alternating_pack(), fast_config(2), traces.clone()).unwrap_err();

    assert!(matches!(err, GameError::Io(_)), "{}", err);
    assert!(!traces.player_path(PlayerId(1)).exists());
    assert!(!traces.deck_path(DeckId(1)).exists());

    std::fs::remove_dir_all(&dir).unwrap();
}

/// Test that a failed setup keeps the traces of an earlier game intact.
#[test]
fn test_failed_setup_keeps_earlier_traces() {
    let dir = std::env::temp_dir().join(format!("card-ring-rerun-{}", std::process::id()));
    let traces = FileTraces::new(&dir).unwrap();
    let earlier = "player 1 initial hand 1 1 1 1\nplayer 1 wins\n";
    std::fs::write(traces.player_path(PlayerId(1)), earlier).unwrap();
    std::fs::create_dir_all(traces.player_path(PlayerId(2))).unwrap();

    assert!(CardGame::setup(alternating_pack(), fast_config(2), traces.clone()).is_err());
    assert_eq!(
        std::fs::read_to_string(traces.player_path(PlayerId(1))).unwrap(),
        earlier
    );

    std::fs::remove_dir_all(&dir).unwrap();
}
