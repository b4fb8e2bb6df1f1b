//! File-backed traces: one text file per player and per deck.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::player::{DeckId, PlayerId};

use super::sink::{deck_trace_name, player_trace_name, TraceOutput, TraceSink};

/// A buffered text file, flushed after every line so a crashed run still
/// leaves complete lines behind.
///
/// An existing file is only truncated by the first write, and a file the
/// sink created is removed again by `abandon`.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
    created: bool,
    started: bool,
}

impl FileSink {
    /// Open `path` for writing, creating it if needed.
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let (file, created) = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => (file, true),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                (OpenOptions::new().write(true).open(&path)?, false)
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            path,
            writer: BufWriter::new(file),
            created,
            started: false,
        })
    }
}

impl TraceSink for FileSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        if !self.started {
            self.writer.get_ref().set_len(0)?;
            self.started = true;
        }
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn abandon(&mut self) -> io::Result<()> {
        if self.created && !self.started {
            std::fs::remove_file(&self.path)?;
            self.created = false;
        }
        Ok(())
    }
}

/// Writes `player{N}_output.txt` and `deck{N}_output.txt` into a directory.
#[derive(Clone, Debug)]
pub struct FileTraces {
    dir: PathBuf,
}

impl FileTraces {
    /// Use `dir` for trace files, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of a player's trace.
    #[must_use]
    pub fn player_path(&self, player: PlayerId) -> PathBuf {
        self.dir.join(player_trace_name(player))
    }

    /// Full path of a deck's trace.
    #[must_use]
    pub fn deck_path(&self, deck: DeckId) -> PathBuf {
        self.dir.join(deck_trace_name(deck))
    }
}

impl TraceOutput for FileTraces {
    fn player_sink(&self, player: PlayerId) -> io::Result<Box<dyn TraceSink>> {
        Ok(Box::new(FileSink::create(self.player_path(player))?))
    }

    fn deck_sink(&self, deck: DeckId) -> io::Result<Box<dyn TraceSink>> {
        Ok(Box::new(FileSink::create(self.deck_path(deck))?))
    }
}
