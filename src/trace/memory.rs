//! In-memory traces, keyed by the file name the file backend would use.
//!
//! Cloning a `MemoryTraces` shares the underlying store, so a test can hand
//! one clone to the game and read lines back from another.

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::core::player::{DeckId, PlayerId};

use super::sink::{deck_trace_name, player_trace_name, TraceOutput, TraceSink};

type Store = Arc<Mutex<FxHashMap<String, Vec<String>>>>;

/// Sink appending to one entry of a shared store.
#[derive(Debug)]
pub struct MemorySink {
    name: String,
    store: Store,
}

impl TraceSink for MemorySink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.store
            .lock()
            .entry(self.name.clone())
            .or_default()
            .push(line.to_string());
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn abandon(&mut self) -> io::Result<()> {
        let mut store = self.store.lock();
        if store.get(&self.name).is_some_and(Vec::is_empty) {
            store.remove(&self.name);
        }
        Ok(())
    }
}

/// Shared in-memory trace store.
#[derive(Clone, Debug, Default)]
pub struct MemoryTraces {
    store: Store,
}

impl MemoryTraces {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn sink(&self, name: String) -> MemorySink {
        // Opening truncates, like creating a file.
        self.store.lock().insert(name.clone(), Vec::new());
        MemorySink {
            name,
            store: Arc::clone(&self.store),
        }
    }

    /// Lines written to the trace called `name`.
    #[must_use]
    pub fn lines(&self, name: &str) -> Vec<String> {
        self.store.lock().get(name).cloned().unwrap_or_default()
    }

    /// Lines written by `player`.
    #[must_use]
    pub fn player_lines(&self, player: PlayerId) -> Vec<String> {
        self.lines(&player_trace_name(player))
    }

    /// Lines written for `deck`.
    #[must_use]
    pub fn deck_lines(&self, deck: DeckId) -> Vec<String> {
        self.lines(&deck_trace_name(deck))
    }

    /// Whether a trace with this name was ever opened.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.store.lock().contains_key(name)
    }
}

impl TraceOutput for MemoryTraces {
    fn player_sink(&self, player: PlayerId) -> io::Result<Box<dyn TraceSink>> {
        Ok(Box::new(self.sink(player_trace_name(player))))
    }

    fn deck_sink(&self, deck: DeckId) -> io::Result<Box<dyn TraceSink>> {
        Ok(Box::new(self.sink(deck_trace_name(deck))))
    }
}
