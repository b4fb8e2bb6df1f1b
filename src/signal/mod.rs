//! Game termination: the one-shot winner election and completion latch.

pub mod termination;

pub use termination::TerminationSignal;
