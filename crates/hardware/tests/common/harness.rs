use cachesim_core::common::data::MemoryRequest;
use cachesim_core::config::{CacheConfig, CacheGeometry, ReplacementPolicy, TimingConfig};
use cachesim_core::sim::Simulator;
use cachesim_core::stats::SimStats;

/// Resolves a geometry, panicking on an invalid configuration.
pub fn geometry(
    size_kb: u32,
    block_bytes: u32,
    ways: u32,
    policy: ReplacementPolicy,
) -> CacheGeometry {
    CacheConfig {
        size_kb,
        block_bytes,
        ways,
        policy,
        ..CacheConfig::default()
    }
    .resolve()
    .expect("test geometry must be valid")
}

#[derive(Debug)]
pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// 1 KB cache, 16-byte blocks, 2-way, round-robin, default timing.
    pub fn new() -> Self {
        Self::with_geometry(geometry(1, 16, 2, ReplacementPolicy::RoundRobin))
    }

    pub fn with_geometry(geometry: CacheGeometry) -> Self {
        Self::with_timing(geometry, TimingConfig::default())
    }

    pub fn with_timing(geometry: CacheGeometry, timing: TimingConfig) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .try_init();
        let sim = Simulator::new(geometry, timing).expect("test geometry must build a cache");
        Self { sim }
    }

    /// Services `request` and returns the cycles it cost.
    pub fn cycles_for(&mut self, request: MemoryRequest) -> u64 {
        let before = self.sim.stats().cycles;
        self.sim.service(&request);
        self.sim.stats().cycles - before
    }

    /// Services `request` and returns the counters it added.
    pub fn delta_for(&mut self, request: MemoryRequest) -> SimStats {
        let before = self.sim.stats().clone();
        self.sim.service(&request);
        let after = self.sim.stats();
        SimStats {
            cycles: after.cycles - before.cycles,
            instructions: after.instructions - before.instructions,
            hits: after.hits - before.hits,
            misses: after.misses - before.misses,
            compulsory_misses: after.compulsory_misses - before.compulsory_misses,
            fetch_requests: after.fetch_requests - before.fetch_requests,
            read_requests: after.read_requests - before.read_requests,
            write_requests: after.write_requests - before.write_requests,
        }
    }
}
