//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the way whose `last_used` stamp is smallest. Stamps come
//! from the simulation clock and are refreshed on every hit and install, so the
//! smallest stamp is the line that has gone untouched the longest. When several
//! ways share the minimum the first one in storage order wins, which keeps runs
//! reproducible.
//!
//! # Performance
//!
//! - **Time Complexity:** `select_victim()`: O(W) where W is the associativity
//! - **Space Complexity:** O(1) beyond the per-way stamps
//! - **Hardware Cost:** High - a comparator tree over full timestamps
//! - **Worst Case:** Scanning patterns larger than the set (thrashing)

use super::ReplacementPolicy;
use crate::cache::set::CacheSet;

/// LRU policy. Stateless; recency lives in each way's stamp.
#[derive(Debug, Clone, Copy, Default)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    fn select_victim(&mut self, set: &mut CacheSet) -> usize {
        let mut victim = 0;
        let mut oldest = u64::MAX;
        for (i, way) in set.ways().iter().enumerate() {
            if way.last_used < oldest {
                oldest = way.last_used;
                victim = i;
            }
        }
        victim
    }
}
