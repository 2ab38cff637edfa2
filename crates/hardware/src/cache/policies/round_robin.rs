//! Round-Robin Replacement Policy.
//!
//! Each set owns a cursor naming the next way to evict. Selecting a victim
//! returns the cursor and advances it, wrapping at the associativity, so
//! consecutive evictions in a set walk its ways in index order regardless of
//! the access pattern.
//!
//! # Performance
//!
//! - **Time Complexity:** `select_victim()`: O(1)
//! - **Space Complexity:** O(S), one cursor per set (held by the set)
//! - **Hardware Cost:** Minimal - a single counter per set

use super::ReplacementPolicy;
use crate::cache::set::CacheSet;

/// Round-robin policy. Stateless; the cursor lives in each [`CacheSet`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobinPolicy;

impl ReplacementPolicy for RoundRobinPolicy {
    fn select_victim(&mut self, set: &mut CacheSet) -> usize {
        set.advance_cursor()
    }
}
