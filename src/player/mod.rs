//! Player workers.
//!
//! Each `Player` runs on its own thread, drawing from its left deck and
//! discarding to its right deck until the termination signal fires.

mod journal;
pub mod worker;

pub use worker::{Player, PlayerState};
