//! Set-Associative Cache Model.
//!
//! This module implements the cache model driven by the simulation engine. It
//! owns every set and way for its lifetime and classifies each access as a
//! hit, a compulsory miss (the set still has a free way) or a conflict miss
//! (the set is full and a line must be evicted). Recency stamps come from the
//! caller's clock; the model keeps no notion of time of its own.

/// Cache replacement policy implementations (Round-Robin, Random, LRU).
pub mod policies;

/// Sets and ways.
pub mod set;

use std::fmt;

use serde::Serialize;

use self::policies::{PolicyDispatch, ReplacementPolicy};
use self::set::CacheSet;
use crate::common::addr::{Address, AddressLayout, DecodedAddress};
use crate::common::error::ConfigError;
use crate::config::{CacheConfig, CacheGeometry, ReplacementPolicy as PolicyType};

/// Classification of one cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AccessOutcome {
    /// A valid way holds the line.
    Hit,
    /// The line is absent and the set still has a free way.
    CompulsoryMiss,
    /// The line is absent and the set is full; an eviction is required.
    ConflictMiss,
}

impl AccessOutcome {
    /// Whether the access hit.
    #[inline]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }
}

impl fmt::Display for AccessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => write!(f, "hit"),
            Self::CompulsoryMiss => write!(f, "compulsory miss"),
            Self::ConflictMiss => write!(f, "conflict miss"),
        }
    }
}

/// Result of [`CacheModel::read`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadResult {
    /// Bytes from the access offset to the end of the block.
    pub serviced: u32,
    /// Hit or miss classification.
    pub outcome: AccessOutcome,
}

/// Result of [`CacheModel::install`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Installed {
    /// Set the line was placed in.
    pub set: u32,
    /// Way the line was placed in.
    pub way: usize,
    /// Base address of the line that was evicted, if the way was occupied.
    pub evicted: Option<Address>,
}

/// Set-associative cache with a fixed array of sets.
#[derive(Debug)]
pub struct CacheModel {
    geometry: CacheGeometry,
    layout: AddressLayout,
    sets: Vec<CacheSet>,
    policy: PolicyDispatch,
}

impl CacheModel {
    /// Builds an empty cache for a resolved geometry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroSetCount`] for a geometry without sets,
    /// [`ConfigError::UnsupportedAssociativity`] for zero ways, and
    /// [`ConfigError::InconsistentGeometry`] when the bit widths do not match
    /// the block size and set count.
    pub fn new(geometry: CacheGeometry) -> Result<Self, ConfigError> {
        if geometry.set_count == 0 {
            return Err(ConfigError::ZeroSetCount {
                size_bytes: geometry.size_bytes,
            });
        }
        if geometry.ways == 0 {
            return Err(ConfigError::UnsupportedAssociativity(0));
        }
        let indexable = 1u64.checked_shl(geometry.index_bits).unwrap_or(u64::MAX);
        if u64::from(geometry.set_count) != indexable
            || 1u64 << geometry.offset_bits.min(63) != u64::from(geometry.block_bytes)
        {
            return Err(ConfigError::InconsistentGeometry {
                set_count: geometry.set_count,
                index_bits: geometry.index_bits,
                offset_bits: geometry.offset_bits,
            });
        }

        let layout = geometry.layout();
        let sets = (0..geometry.set_count)
            .map(|_| CacheSet::new(geometry.ways as usize))
            .collect();
        let policy = PolicyDispatch::new(geometry.policy, geometry.seed);
        Ok(Self {
            geometry,
            layout,
            sets,
            policy,
        })
    }

    /// Resolves `config` and builds an empty cache.
    ///
    /// # Errors
    ///
    /// Propagates any [`ConfigError`] from [`CacheConfig::resolve`].
    pub fn from_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        Self::new(config.resolve()?)
    }

    /// Resolved geometry.
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// Address layout used to decompose addresses.
    pub const fn layout(&self) -> AddressLayout {
        self.layout
    }

    /// Active replacement policy.
    pub const fn policy(&self) -> PolicyType {
        self.policy.kind()
    }

    /// All sets in index order.
    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    /// Set at `index`.
    pub fn set(&self, index: u32) -> Option<&CacheSet> {
        self.sets.get(index as usize)
    }

    /// Whether the line holding `addr` is resident. Does not touch recency.
    pub fn contains(&self, addr: Address) -> bool {
        let DecodedAddress { tag, index, .. } = self.layout.decompose(addr);
        self.sets[index as usize].lookup(tag).is_some()
    }

    /// Looks up `addr` and classifies the access.
    ///
    /// A hit refreshes the matching way's stamp to `now`. The serviced byte
    /// count is always the remainder of the block from the access offset,
    /// whatever the outcome; on a miss the caller installs the line.
    pub fn read(&mut self, addr: Address, bytes_remaining: u32, now: u64) -> ReadResult {
        let DecodedAddress { tag, index, offset } = self.layout.decompose(addr);
        let serviced = self.geometry.block_bytes - offset;
        let set = &mut self.sets[index as usize];

        let outcome = if let Some(way) = set.lookup(tag) {
            set.touch(way, now);
            AccessOutcome::Hit
        } else if set.is_full() {
            AccessOutcome::ConflictMiss
        } else {
            AccessOutcome::CompulsoryMiss
        };

        tracing::trace!(
            addr = format_args!("{addr:#010x}"),
            set = index,
            tag,
            bytes_remaining,
            serviced,
            %outcome,
            "cache read"
        );
        ReadResult { serviced, outcome }
    }

    /// Places the line holding `addr` in its set, stamped with `now`.
    ///
    /// The first free way is used when one exists; the replacement policy is
    /// only consulted for a full set. Installing a line that is already
    /// resident just refreshes its stamp.
    pub fn install(&mut self, addr: Address, now: u64) -> Installed {
        let DecodedAddress { tag, index, .. } = self.layout.decompose(addr);
        let set = &mut self.sets[index as usize];

        if let Some(way) = set.lookup(tag) {
            set.touch(way, now);
            return Installed {
                set: index,
                way,
                evicted: None,
            };
        }

        let way = match set.free_way() {
            Some(free) => free,
            None => self.policy.select_victim(set),
        };
        let evicted = set
            .fill(way, tag, now)
            .filter(|previous| previous.valid)
            .map(|previous| {
                self.layout.compose(DecodedAddress {
                    tag: previous.tag,
                    index,
                    offset: 0,
                })
            });

        if let Some(victim) = evicted {
            tracing::trace!(
                set = index,
                way,
                victim = format_args!("{victim:#010x}"),
                "evicted line"
            );
        }
        Installed {
            set: index,
            way,
            evicted,
        }
    }

    /// Empties every set and restarts the replacement policy from its seed.
    pub fn reset(&mut self) {
        for set in &mut self.sets {
            *set = CacheSet::new(self.geometry.ways as usize);
        }
        self.policy = PolicyDispatch::new(self.geometry.policy, self.geometry.seed);
    }

    /// Number of valid lines across all sets.
    pub fn resident_lines(&self) -> usize {
        self.sets.iter().map(CacheSet::occupancy).sum()
    }
}
