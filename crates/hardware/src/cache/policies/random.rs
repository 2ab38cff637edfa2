//! Random Replacement Policy.
//!
//! This policy evicts a uniformly chosen way from the set. The generator is
//! seeded from the configuration, so a run is reproducible for a given seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::ReplacementPolicy;
use crate::cache::set::CacheSet;

/// Random policy state.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    /// Creates a policy whose victim sequence is determined by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ReplacementPolicy for RandomPolicy {
    fn select_victim(&mut self, set: &mut CacheSet) -> usize {
        self.rng.gen_range(0..set.associativity())
    }
}
