//! Deterministic random number generation for pack generation.
//!
//! The game itself is deterministic given a pack; randomness only enters
//! when a pack is generated. Seeding keeps generated packs reproducible:
//!
//! ```
//! use card_ring::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! let mut x: Vec<u32> = (1..=16).collect();
//! let mut y = x.clone();
//! a.shuffle(&mut x);
//! b.shuffle(&mut y);
//! assert_eq!(x, y);
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_deal_order() {
        let mut a: Vec<u32> = (1..=24).collect();
        let mut b = a.clone();
        GameRng::new(5).shuffle(&mut a);
        GameRng::new(5).shuffle(&mut b);
        assert_eq!(a, b);

        let mut c: Vec<u32> = (1..=24).collect();
        GameRng::new(6).shuffle(&mut c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_shuffle_keeps_every_card() {
        let mut values: Vec<u32> = (1..=3).flat_map(|v| [v; 8]).collect();
        GameRng::new(42).shuffle(&mut values);

        for v in 1..=3 {
            assert_eq!(values.iter().filter(|&&x| x == v).count(), 8);
        }
        assert_eq!(values.len(), 24);
    }

    #[test]
    fn test_seed_is_kept() {
        assert_eq!(GameRng::new(99).seed(), 99);
    }
}
