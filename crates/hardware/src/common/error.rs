//! Error definitions.
//!
//! This module defines the failure taxonomy of the simulator. It provides:
//! 1. **Configuration Errors:** Fatal problems with the requested cache geometry.
//! 2. **Sequencing Errors:** Contract violations while turning trace records into requests.
//! 3. **Trace Errors:** I/O and format problems while loading a trace file.
//!
//! Non-fatal conditions (a cache size rounded down to a power of two) are not
//! errors; they are reported through `tracing` and the run continues.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal problems with a cache configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Cache size outside the accepted KiB range.
    #[error("cache size {0} KB is out of range (expected {min} to {max})", min = crate::common::constants::MIN_CACHE_KB, max = crate::common::constants::MAX_CACHE_KB)]
    CacheSizeOutOfRange(u32),

    /// Block size outside the accepted byte range.
    #[error("block size {0} B is out of range (expected {min} to {max})", min = crate::common::constants::MIN_BLOCK_BYTES, max = crate::common::constants::MAX_BLOCK_BYTES)]
    BlockSizeOutOfRange(u32),

    /// Block size that cannot be addressed by an offset field.
    #[error("block size {0} B is not a power of two")]
    BlockSizeNotPowerOfTwo(u32),

    /// Associativity other than 1, 2, 4, 8 or 16.
    #[error("associativity {0} is not supported (expected 1, 2, 4, 8 or 16)")]
    UnsupportedAssociativity(u32),

    /// The geometry leaves no set to index.
    #[error("cache of {size_bytes} B has no sets")]
    ZeroSetCount {
        /// Effective cache size in bytes.
        size_bytes: u64,
    },

    /// One set needs more bytes than the whole cache holds.
    #[error("{ways}-way sets of {block_bytes} B blocks do not fit in a {size_bytes} B cache")]
    AssociativityExceedsCapacity {
        /// Effective cache size in bytes.
        size_bytes: u64,
        /// Block size in bytes.
        block_bytes: u32,
        /// Associativity.
        ways: u32,
    },

    /// Offset and index fields together are wider than an address.
    #[error("offset ({offset_bits}) and index ({index_bits}) bits leave no room for a tag")]
    NegativeTagBits {
        /// Width of the block-offset field.
        offset_bits: u32,
        /// Width of the set-index field.
        index_bits: u32,
    },

    /// Hand-built geometry whose bit widths disagree with its sizes.
    #[error(
        "geometry with {set_count} sets is inconsistent with {index_bits} index bits and {offset_bits} offset bits"
    )]
    InconsistentGeometry {
        /// Number of sets.
        set_count: u32,
        /// Width of the set-index field.
        index_bits: u32,
        /// Width of the block-offset field.
        offset_bits: u32,
    },

    /// Replacement policy name that does not match any variant.
    #[error("unknown replacement policy '{0}' (expected RR, RND or LRU)")]
    UnknownPolicy(String),
}

/// Misuse of the request sequencing contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// The instruction has no memory request left.
    #[error("instruction has no memory requests remaining")]
    Exhausted,

    /// A data record appeared with no fetch record to attach it to.
    #[error("data access record at line {line} has no preceding fetch record")]
    DataBeforeFetch {
        /// 1-based line number of the offending record.
        line: usize,
    },
}

/// Failures while loading a trace.
#[derive(Error, Debug)]
pub enum TraceError {
    /// The trace file could not be read.
    #[error("could not read trace file '{}': {source}", .path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A record is truncated or contains a non-hexadecimal field.
    #[error("malformed trace record at line {line}: {reason}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the record.
        reason: String,
    },

    /// Records appeared in an order that cannot form an instruction.
    #[error(transparent)]
    Sequence(#[from] SequenceError),
}

/// Top-level error for convenience entry points.
#[derive(Error, Debug)]
pub enum SimError {
    /// Invalid cache configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Trace could not be loaded.
    #[error("trace error: {0}")]
    Trace(#[from] TraceError),

    /// Request sequencing contract violated.
    #[error("sequencing error: {0}")]
    Sequence(#[from] SequenceError),
}

/// Result alias used by the convenience entry points.
pub type SimResult<T> = Result<T, SimError>;
