//! Trace-driven set-associative cache simulator library.
//!
//! This crate models a single-level hardware cache fed by a memory-access trace
//! and estimates hit rate, miss rate, and CPI with the following:
//! 1. **Cache:** Address decomposition, sets and ways, and the round-robin, random, and LRU policies.
//! 2. **Configuration:** User-facing cache parameters resolved into a validated geometry.
//! 3. **Simulation:** Trace loading, request sequencing, and the cycle-cost engine.
//! 4. **Statistics:** Counters and derived rates, printable by section.

/// Set-associative cache model and replacement policies.
pub mod cache;
/// Common types and constants (addresses, access types, errors).
pub mod common;
/// Simulator configuration (defaults, policy enum, geometry, timing).
pub mod config;
/// Trace loading, request sequencing, and the simulation engine.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// The cache model driven by the simulator.
pub use crate::cache::{AccessOutcome, CacheModel};
/// User-facing configuration; use `CacheConfig::default()` or deserialize from JSON.
pub use crate::config::{CacheConfig, CacheGeometry, ReplacementPolicy, TimingConfig};
/// Simulation engine and its one-shot entry point.
pub use crate::sim::{Simulator, simulate};
/// Counters produced by a run.
pub use crate::stats::SimStats;
