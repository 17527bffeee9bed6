//! Injectable randomness for the random-move tier

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Uniform integer source
pub trait RandomSource {
    /// Index in `0..len`. `len` is never zero.
    fn next_index(&mut self, len: usize) -> usize;
}

/// ChaCha8-backed source, reproducible when seeded
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::new(42)
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Replays a fixed list of indices, cycling, each reduced modulo `len`
#[derive(Clone, Debug)]
pub struct FixedSequence {
    values: Vec<usize>,
    cursor: usize,
}

impl FixedSequence {
    pub fn new(values: Vec<usize>) -> Self {
        assert!(!values.is_empty(), "FixedSequence needs at least one value");
        Self { values, cursor: 0 }
    }
}

impl RandomSource for FixedSequence {
    fn next_index(&mut self, len: usize) -> usize {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % len
    }
}
