//! Configuration system for the cache simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline cache geometry and policy seed.
//! 2. **Structures:** The user-facing [`CacheConfig`], the resolved [`CacheGeometry`]
//!    with every derived bit width, and the [`TimingConfig`] cost model.
//! 3. **Enums:** The [`ReplacementPolicy`] selector.
//!
//! Configuration is supplied by command-line flags or a JSON file; use
//! `CacheConfig::default()` for the reference geometry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::addr::AddressLayout;
use crate::common::constants::{
    ADDRESS_BITS, BUS_SIZE, DEFAULT_EXECUTION_CYCLES, DEFAULT_MEM_ACCESS_CYCLES, LINE_STATUS_BITS,
    MAX_BLOCK_BYTES, MAX_CACHE_KB, MIN_BLOCK_BYTES, MIN_CACHE_KB, SUPPORTED_WAYS,
};
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default cache size in KiB (1 MiB).
    pub const CACHE_KB: u32 = 1024;

    /// Default block size in bytes.
    pub const BLOCK_BYTES: u32 = 16;

    /// Default associativity.
    pub const WAYS: u32 = 2;

    /// Default seed for the random replacement policy.
    ///
    /// A fixed seed keeps random-replacement runs reproducible.
    pub const POLICY_SEED: u64 = 0x5EED_CAC4_E000_0001;
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which way to evict when a line
/// must be installed in a full set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum ReplacementPolicy {
    /// Round-robin replacement.
    ///
    /// Each set keeps a cursor that walks its ways in index order.
    #[default]
    #[serde(rename = "RR", alias = "rr", alias = "RoundRobin")]
    RoundRobin,
    /// Random replacement.
    ///
    /// Evicts a uniformly chosen way, drawn from a seeded generator.
    #[serde(rename = "RND", alias = "rnd", alias = "Random")]
    Random,
    /// Least Recently Used replacement.
    ///
    /// Evicts the way with the oldest access stamp.
    #[serde(rename = "LRU", alias = "lru", alias = "Lru")]
    Lru,
}

impl ReplacementPolicy {
    /// Every policy, in declaration order.
    pub const ALL: [Self; 3] = [Self::RoundRobin, Self::Random, Self::Lru];

    /// Short tag used on the command line (`RR`, `RND`, `LRU`).
    pub const fn tag(self) -> &'static str {
        match self {
            Self::RoundRobin => "RR",
            Self::Random => "RND",
            Self::Lru => "LRU",
        }
    }

    /// Human-readable name used in reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::RoundRobin => "Round Robin",
            Self::Random => "Random",
            Self::Lru => "Least Recently Used",
        }
    }
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ReplacementPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RR" | "ROUNDROBIN" | "ROUND-ROBIN" => Ok(Self::RoundRobin),
            "RND" | "RANDOM" => Ok(Self::Random),
            "LRU" => Ok(Self::Lru),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

/// User-facing cache configuration.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{CacheConfig, ReplacementPolicy};
///
/// let json = r#"{ "size_kb": 1, "block_bytes": 16, "ways": 2, "policy": "LRU" }"#;
/// let config: CacheConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.policy, ReplacementPolicy::Lru);
///
/// let geometry = config.resolve().unwrap();
/// assert_eq!(geometry.set_count, 32);
/// assert_eq!(geometry.offset_bits + geometry.index_bits + geometry.tag_bits, 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Total cache size in KiB (1 to 8192).
    #[serde(default = "CacheConfig::default_size_kb")]
    pub size_kb: u32,

    /// Block (line) size in bytes, a power of two from 4 to 64.
    #[serde(default = "CacheConfig::default_block_bytes")]
    pub block_bytes: u32,

    /// Associativity (1, 2, 4, 8 or 16).
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: u32,

    /// Replacement policy
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Seed for the random replacement policy
    #[serde(default = "CacheConfig::default_seed")]
    pub seed: u64,
}

impl CacheConfig {
    /// Returns the default cache size in KiB.
    fn default_size_kb() -> u32 {
        defaults::CACHE_KB
    }

    /// Returns the default block size in bytes.
    fn default_block_bytes() -> u32 {
        defaults::BLOCK_BYTES
    }

    /// Returns the default associativity.
    fn default_ways() -> u32 {
        defaults::WAYS
    }

    /// Returns the default random-policy seed.
    fn default_seed() -> u64 {
        defaults::POLICY_SEED
    }

    /// Checks the accepted input ranges and derives the full geometry.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the size is outside 1–8192 KiB or when
    /// [`CacheGeometry::new`] rejects the derived geometry.
    pub fn resolve(&self) -> Result<CacheGeometry, ConfigError> {
        if !(MIN_CACHE_KB..=MAX_CACHE_KB).contains(&self.size_kb) {
            return Err(ConfigError::CacheSizeOutOfRange(self.size_kb));
        }
        CacheGeometry::new(
            u64::from(self.size_kb) * 1024,
            self.block_bytes,
            self.ways,
            self.policy,
            self.seed,
        )
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_kb: defaults::CACHE_KB,
            block_bytes: defaults::BLOCK_BYTES,
            ways: defaults::WAYS,
            policy: ReplacementPolicy::default(),
            seed: defaults::POLICY_SEED,
        }
    }
}

/// Fully resolved cache geometry.
///
/// Every value a cache model or a report needs, derived once and invariant for
/// the lifetime of the model: `offset_bits + index_bits + tag_bits == 32`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheGeometry {
    /// Size the caller asked for, in bytes.
    pub requested_size_bytes: u64,
    /// Effective size in bytes, the requested size rounded down to a power of two.
    pub size_bytes: u64,
    /// Block size in bytes.
    pub block_bytes: u32,
    /// Associativity.
    pub ways: u32,
    /// Replacement policy.
    pub policy: ReplacementPolicy,
    /// Seed for the random replacement policy.
    pub seed: u64,
    /// Number of sets.
    pub set_count: u32,
    /// Width of the block-offset field.
    pub offset_bits: u32,
    /// Width of the set-index field.
    pub index_bits: u32,
    /// Width of the tag field.
    pub tag_bits: u32,
    /// Number of blocks the cache holds.
    pub total_blocks: u64,
    /// Bookkeeping storage (tag and valid bit per block) in bytes.
    pub overhead_bytes: u64,
    /// Data plus bookkeeping storage in bytes.
    pub implementation_bytes: u64,
}

impl CacheGeometry {
    /// Derives a geometry from a size in bytes.
    ///
    /// A size that is not a power of two is rounded down and reported as a
    /// warning; this is the only correction applied.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the block size or associativity is not
    /// supported, the size is zero, one set does not fit in the cache, or the
    /// offset and index fields leave no room for a tag.
    pub fn new(
        requested_size_bytes: u64,
        block_bytes: u32,
        ways: u32,
        policy: ReplacementPolicy,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        if !(MIN_BLOCK_BYTES..=MAX_BLOCK_BYTES).contains(&block_bytes) {
            return Err(ConfigError::BlockSizeOutOfRange(block_bytes));
        }
        if !block_bytes.is_power_of_two() {
            return Err(ConfigError::BlockSizeNotPowerOfTwo(block_bytes));
        }
        if !SUPPORTED_WAYS.contains(&ways) {
            return Err(ConfigError::UnsupportedAssociativity(ways));
        }
        if requested_size_bytes == 0 {
            return Err(ConfigError::ZeroSetCount { size_bytes: 0 });
        }

        let size_bytes = prev_power_of_two(requested_size_bytes);
        if size_bytes != requested_size_bytes {
            tracing::warn!(
                requested = requested_size_bytes,
                effective = size_bytes,
                "cache size is not a power of two; rounding down"
            );
        }

        let set_bytes = u64::from(block_bytes) * u64::from(ways);
        if size_bytes % set_bytes != 0 {
            return Err(ConfigError::AssociativityExceedsCapacity {
                size_bytes,
                block_bytes,
                ways,
            });
        }
        let set_count = size_bytes.div_ceil(set_bytes);
        if set_count == 0 {
            return Err(ConfigError::ZeroSetCount { size_bytes });
        }

        let offset_bits = block_bytes.trailing_zeros();
        let index_bits = ceil_log2(set_count);
        if offset_bits + index_bits > ADDRESS_BITS {
            return Err(ConfigError::NegativeTagBits {
                offset_bits,
                index_bits,
            });
        }
        let tag_bits = ADDRESS_BITS - offset_bits - index_bits;

        let total_blocks = size_bytes / u64::from(block_bytes);
        let overhead_bytes = ((u64::from(tag_bits) + LINE_STATUS_BITS) * total_blocks).div_ceil(8);

        let geometry = Self {
            requested_size_bytes,
            size_bytes,
            block_bytes,
            ways,
            policy,
            seed,
            set_count: set_count as u32,
            offset_bits,
            index_bits,
            tag_bits,
            total_blocks,
            overhead_bytes,
            implementation_bytes: size_bytes + overhead_bytes,
        };
        tracing::debug!(
            sets = geometry.set_count,
            offset_bits,
            index_bits,
            tag_bits,
            policy = %policy,
            "resolved cache geometry"
        );
        Ok(geometry)
    }

    /// Address layout for this geometry.
    pub const fn layout(&self) -> AddressLayout {
        AddressLayout::new(self.offset_bits, self.index_bits)
    }

    /// Whether the requested size had to be rounded down.
    pub const fn size_rounded(&self) -> bool {
        self.size_bytes != self.requested_size_bytes
    }
}

/// Largest power of two not greater than `value` (`value > 0`).
const fn prev_power_of_two(value: u64) -> u64 {
    1 << (63 - value.leading_zeros())
}

/// Smallest `n` with `2^n >= value` (`value > 0`).
const fn ceil_log2(value: u64) -> u32 {
    if value <= 1 {
        0
    } else {
        64 - (value - 1).leading_zeros()
    }
}

/// Cycle-cost model.
///
/// Not exposed on the command line; tests construct it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimingConfig {
    /// Cycles charged once per memory request.
    pub execution_cycles: u64,
    /// Cycles charged per bus transfer on a refill.
    pub mem_access_cycles: u64,
    /// Bus width in bytes.
    pub bus_bytes: u32,
}

impl TimingConfig {
    /// Cycles to refill one block of `block_bytes` over the bus.
    pub const fn refill_cycles(&self, block_bytes: u32) -> u64 {
        let bus = if self.bus_bytes == 0 { 1 } else { self.bus_bytes };
        self.mem_access_cycles * block_bytes.div_ceil(bus) as u64
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            execution_cycles: DEFAULT_EXECUTION_CYCLES,
            mem_access_cycles: DEFAULT_MEM_ACCESS_CYCLES,
            bus_bytes: BUS_SIZE,
        }
    }
}
