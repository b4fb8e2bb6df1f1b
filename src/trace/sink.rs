//! Trace sink traits.
//!
//! Every player and every deck writes to its own append-only line sink. A
//! `TraceOutput` hands out those sinks, so the game never names files itself.

use std::io;

use crate::core::player::{DeckId, PlayerId};

/// An append-only, line-oriented output.
pub trait TraceSink: Send {
    /// Append one line. The sink adds the line terminator.
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Push buffered lines to their destination.
    fn flush(&mut self) -> io::Result<()>;

    /// Undo opening this sink: the game it was opened for will never start.
    ///
    /// Only called before any line was written. Sinks that leave nothing
    /// behind until written to can keep the default.
    fn abandon(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Factory for per-player and per-deck sinks.
pub trait TraceOutput: Send + Sync {
    /// Open the trace for `player`.
    fn player_sink(&self, player: PlayerId) -> io::Result<Box<dyn TraceSink>>;

    /// Open the trace for `deck`.
    fn deck_sink(&self, deck: DeckId) -> io::Result<Box<dyn TraceSink>>;
}

/// Name of a player's trace: `player{N}_output.txt`.
#[must_use]
pub fn player_trace_name(player: PlayerId) -> String {
    format!("player{}_output.txt", player.raw())
}

/// Name of a deck's trace: `deck{N}_output.txt`.
#[must_use]
pub fn deck_trace_name(deck: DeckId) -> String {
    format!("deck{}_output.txt", deck.raw())
}

/// Sink that drops everything. Used where traces are not wanted, such as
/// benchmarks.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn write_line(&mut self, _line: &str) -> io::Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Output that hands out `NullSink`s.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullTraces;

impl TraceOutput for NullTraces {
    fn player_sink(&self, _player: PlayerId) -> io::Result<Box<dyn TraceSink>> {
        Ok(Box::new(NullSink))
    }

    fn deck_sink(&self, _deck: DeckId) -> io::Result<Box<dyn TraceSink>> {
        Ok(Box::new(NullSink))
    }
}
