//! A player's trace writer.
//!
//! Trace failures must not stop play, so the journal keeps the first I/O
//! error, skips every later line, and hands the error back when the worker
//! finishes. The sink is flushed on every exit path, including drop.

use std::io;

use crate::trace::TraceSink;

pub struct Journal {
    sink: Box<dyn TraceSink>,
    error: Option<io::Error>,
}

impl Journal {
    pub fn new(sink: Box<dyn TraceSink>) -> Self {
        Self { sink, error: None }
    }

    /// Append a line unless an earlier write already failed.
    pub fn line(&mut self, line: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.sink.write_line(line) {
            log::error!("trace write failed: {}", e);
            self.error = Some(e);
        }
    }

    pub fn flush(&mut self) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.sink.flush() {
            log::error!("trace flush failed: {}", e);
            self.error = Some(e);
        }
    }

    /// The first error seen, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

impl Drop for Journal {
    fn drop(&mut self) {
        let _ = self.sink.flush();
    }
}

impl std::fmt::Debug for Journal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Journal")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
