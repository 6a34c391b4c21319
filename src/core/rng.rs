//! Deterministic random number generation for ball draws and card generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Context streams**: Independent sequences for different purposes
//!
//! Context seeds are an `FxHasher` mix of the seed and the context bytes,
//! independent of the standard library's hasher.
//!
//! ```
//! use bingo_tracker::core::BingoRng;
//!
//! let rng = BingoRng::new(42);
//!
//! // Card generation and ball draws never share a stream
//! let mut cards = rng.for_context("cards");
//! let mut balls = rng.for_context("balls");
//!
//! let mut a: Vec<u8> = (1..=10).collect();
//! let mut b = a.clone();
//! cards.shuffle(&mut a);
//! balls.shuffle(&mut b);
//! assert_ne!(a, b);
//! ```

use std::hash::Hasher;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct BingoRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl BingoRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        hasher.write_u64(self.seed);
        hasher.write(context.as_bytes());
        hasher.write_u8(0xff);
        Self::new(hasher.finish())
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}
