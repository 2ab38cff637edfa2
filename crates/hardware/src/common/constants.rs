//! Global Simulator Constants.
//!
//! This module defines the fixed parameters of the cost model and the request format. It includes:
//! 1. **Address Constants:** Width of the simulated address space.
//! 2. **Timing Constants:** Issue overhead, memory access latency and bus width.
//! 3. **Request Constants:** Fixed data access length and accepted geometry ranges.

/// Width of a simulated address in bits.
pub const ADDRESS_BITS: u32 = 32;

/// Cycles charged once per memory request to model instruction issue.
pub const DEFAULT_EXECUTION_CYCLES: u64 = 2;

/// Cycles charged per bus transfer when a line is refilled from memory.
pub const DEFAULT_MEM_ACCESS_CYCLES: u64 = 3;

/// Width of the memory bus in bytes.
pub const BUS_SIZE: u32 = 4;

/// Length in bytes of every data read and data write.
pub const DATA_ACCESS_BYTES: u32 = 4;

/// Smallest accepted cache size in KiB.
pub const MIN_CACHE_KB: u32 = 1;

/// Largest accepted cache size in KiB (8 MiB).
pub const MAX_CACHE_KB: u32 = 8192;

/// Smallest accepted block size in bytes.
pub const MIN_BLOCK_BYTES: u32 = 4;

/// Largest accepted block size in bytes.
pub const MAX_BLOCK_BYTES: u32 = 64;

/// Accepted associativities.
pub const SUPPORTED_WAYS: [u32; 5] = [1, 2, 4, 8, 16];

/// Bits of per-line bookkeeping besides the tag (the valid bit).
pub const LINE_STATUS_BITS: u64 = 1;
