//! Cards in play: the pack, the deal, and player hands.
//!
//! - `Pack`: the immutable card source, loaded or generated before setup
//! - `Deal`: round-robin split of a pack into hands and decks
//! - `Hand`: the cards one player holds, with the win and discard rules

pub mod hand;
pub mod pack;
pub mod deal;

pub use hand::Hand;
pub use pack::Pack;
pub use deal::Deal;
