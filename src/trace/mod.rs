//! Trace output for players and decks.
//!
//! - `TraceSink`: one append-only line log
//! - `TraceOutput`: opens the sink for a given player or deck
//! - `FileTraces`: `player{N}_output.txt` / `deck{N}_output.txt` on disk
//! - `MemoryTraces`: the same layout held in memory
//! - `NullTraces`: discards everything

pub mod sink;
pub mod file;
pub mod memory;

pub use sink::{deck_trace_name, player_trace_name, NullSink, NullTraces, TraceOutput, TraceSink};
pub use file::{FileSink, FileTraces};
pub use memory::{MemorySink, MemoryTraces};
