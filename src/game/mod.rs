//! Running a game.
//!
//! - `CardGame`: setup, run, shutdown, rebalancing
//! - `validator`: end-state consistency warnings
//! - `GameOutcome`: what a finished game reports

pub mod orchestrator;
pub mod outcome;
pub mod validator;

pub use orchestrator::CardGame;
pub use outcome::{DeckSummary, GameOutcome, GameResult, PlayerSummary};
pub use validator::{validate, validate_contents, ValidationReport, Warning};
