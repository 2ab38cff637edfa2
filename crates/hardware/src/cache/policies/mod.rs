//! Cache Replacement Policies.
//!
//! Implements the algorithms for selecting victim ways in full sets.
//!
//! # Policies
//!
//! - `RoundRobin`: Per-set cursor walking the ways in index order.
//! - `Random`: Uniform choice from a seeded generator.
//! - `Lru`: Oldest access stamp, ties broken by lowest way index.
//!
//! The set of policies is closed: [`PolicyDispatch`] is chosen once when the
//! cache is built and forwards to one of the three implementations.

/// Least Recently Used replacement policy.
pub mod lru;

/// Random replacement policy.
pub mod random;

/// Round-robin replacement policy.
pub mod round_robin;

pub use lru::LruPolicy;
pub use random::RandomPolicy;
pub use round_robin::RoundRobinPolicy;

use super::set::CacheSet;
use crate::config::ReplacementPolicy as PolicyType;

/// Trait for cache replacement policies.
///
/// Policies are only consulted for full sets; a free way is always filled
/// directly by the cache.
pub trait ReplacementPolicy {
    /// Selects the way to evict from a full set.
    ///
    /// # Arguments
    ///
    /// * `set` - The full set. Policies that keep per-set state (the
    ///   round-robin cursor) update it here.
    ///
    /// # Returns
    ///
    /// The index of the way to evict, in `[0, set.associativity())`.
    fn select_victim(&mut self, set: &mut CacheSet) -> usize;
}

/// The active replacement policy of a cache.
#[derive(Debug)]
pub enum PolicyDispatch {
    /// Round-robin replacement.
    RoundRobin(RoundRobinPolicy),
    /// Random replacement.
    Random(RandomPolicy),
    /// Least Recently Used replacement.
    Lru(LruPolicy),
}

impl PolicyDispatch {
    /// Builds the policy selected by `kind`; `seed` only affects `Random`.
    pub fn new(kind: PolicyType, seed: u64) -> Self {
        match kind {
            PolicyType::RoundRobin => Self::RoundRobin(RoundRobinPolicy),
            PolicyType::Random => Self::Random(RandomPolicy::new(seed)),
            PolicyType::Lru => Self::Lru(LruPolicy),
        }
    }

    /// The policy kind this dispatcher forwards to.
    pub const fn kind(&self) -> PolicyType {
        match self {
            Self::RoundRobin(_) => PolicyType::RoundRobin,
            Self::Random(_) => PolicyType::Random,
            Self::Lru(_) => PolicyType::Lru,
        }
    }
}

impl ReplacementPolicy for PolicyDispatch {
    fn select_victim(&mut self, set: &mut CacheSet) -> usize {
        match self {
            Self::RoundRobin(p) => p.select_victim(set),
            Self::Random(p) => p.select_victim(set),
            Self::Lru(p) => p.select_victim(set),
        }
    }
}
