//! Simulator: owns the cache model, the clock, and the counters side-by-side.
//!
//! Requests are serviced in block-sized chunks. Each chunk advances the
//! clock, is looked up in the cache, and on a miss installs its line and pays
//! the refill cost. The execution cost is charged once per request.

use crate::cache::{AccessOutcome, CacheModel};
use crate::common::data::{Instruction, MemoryRequest};
use crate::common::error::{ConfigError, SimResult};
use crate::config::{CacheConfig, CacheGeometry, TimingConfig};
use crate::sim::sequencer::RequestSequencer;
use crate::stats::SimStats;

/// Top-level simulator: cache state + cost model + counters.
#[derive(Debug)]
pub struct Simulator {
    cache: CacheModel,
    timing: TimingConfig,
    refill_cycles: u64,
    clock: u64,
    stats: SimStats,
}

impl Simulator {
    /// Creates a simulator with an empty cache.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the cache model rejects `geometry`.
    pub fn new(geometry: CacheGeometry, timing: TimingConfig) -> Result<Self, ConfigError> {
        let refill_cycles = timing.refill_cycles(geometry.block_bytes);
        Ok(Self {
            cache: CacheModel::new(geometry)?,
            timing,
            refill_cycles,
            clock: 0,
            stats: SimStats::default(),
        })
    }

    /// Services one memory request.
    ///
    /// The request is split at block boundaries; every chunk is counted as a
    /// hit or a miss and the address wraps at the top of the address space.
    pub fn service(&mut self, request: &MemoryRequest) {
        self.stats.record_request(request.kind);
        self.stats.cycles += self.timing.execution_cycles;

        let mut address = request.address;
        let mut remaining = request.length;
        while remaining > 0 {
            self.clock += 1;
            let result = self.cache.read(address, remaining, self.clock);
            match result.outcome {
                AccessOutcome::Hit => {
                    self.stats.hits += 1;
                    self.stats.cycles += 1;
                }
                outcome => {
                    self.stats.misses += 1;
                    if outcome == AccessOutcome::CompulsoryMiss {
                        self.stats.compulsory_misses += 1;
                    }
                    let _ = self.cache.install(address, self.clock);
                    self.stats.cycles += self.refill_cycles;
                }
            }
            remaining = remaining.saturating_sub(result.serviced);
            address = address.wrapping_add(result.serviced);
        }
    }

    /// Services every request of `instruction` in order and counts it.
    pub fn step(&mut self, instruction: &Instruction) {
        for sequenced in RequestSequencer::new(instruction) {
            self.service(&sequenced.request);
        }
        self.stats.instructions += 1;
    }

    /// Services `instructions` in order and returns the accumulated counters.
    pub fn run(&mut self, instructions: &[Instruction]) -> &SimStats {
        for instruction in instructions {
            self.step(instruction);
        }
        tracing::debug!(
            instructions = self.stats.instructions,
            cycles = self.stats.cycles,
            hits = self.stats.hits,
            misses = self.stats.misses,
            "simulation finished"
        );
        &self.stats
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Current clock value (number of chunks serviced).
    pub const fn clock(&self) -> u64 {
        self.clock
    }

    /// The cache being simulated.
    pub const fn cache(&self) -> &CacheModel {
        &self.cache
    }

    /// Resolved geometry of the cache.
    pub const fn geometry(&self) -> &CacheGeometry {
        self.cache.geometry()
    }

    /// Cost model in use.
    pub const fn timing(&self) -> TimingConfig {
        self.timing
    }

    /// Empties the cache, rewinds the clock, and clears every counter.
    pub fn reset(&mut self) {
        self.cache.reset();
        self.clock = 0;
        self.stats = SimStats::default();
    }
}

/// Resolves `config`, runs `instructions` through a fresh simulator with the
/// default cost model, and returns the final counters.
///
/// # Errors
///
/// Returns [`crate::common::error::SimError::Config`] if the configuration is invalid.
pub fn simulate(config: &CacheConfig, instructions: &[Instruction]) -> SimResult<SimStats> {
    let mut simulator = Simulator::new(config.resolve()?, TimingConfig::default())?;
    Ok(simulator.run(instructions).clone())
}
