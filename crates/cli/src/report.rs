//! Human-readable and JSON run reports.
//!
//! The text report has three parts: a header echoing the command line and
//! requested configuration, the values derived from the geometry, and the
//! results printed by [`SimStats::print_sections`].

use std::path::Path;

use cachesim_core::common::data::Instruction;
use cachesim_core::config::CacheGeometry;
use cachesim_core::sim::RequestSequencer;
use cachesim_core::stats::SimStats;
use serde::Serialize;

/// Prints the command line and the requested configuration.
pub fn print_header(command_line: &[String], trace: &Path, geometry: &CacheGeometry) {
    println!();
    println!("Cmd Line: {}", command_line.join(" "));
    println!("Trace File: {}", trace.display());
    println!("Cache Size: {} KB", geometry.requested_size_bytes / 1024);
    println!("Block Size: {} bytes", geometry.block_bytes);
    println!("Associativity: {}", geometry.ways);
    println!("R-Policy: {}", geometry.policy.name());
    println!();
}

/// Prints the values derived from the resolved geometry.
pub fn print_calculated(geometry: &CacheGeometry) {
    println!("----- Calculated Values -----");
    println!("Total #Blocks: {}", geometry.total_blocks);
    println!("Tag Size: {} bits", geometry.tag_bits);
    println!(
        "Index Size: {} bits, Total Indices: {}",
        geometry.index_bits, geometry.set_count
    );
    println!("Overhead Memory Size: {} bytes", geometry.overhead_bytes);
    println!(
        "Implementation Memory Size: {} bytes",
        geometry.implementation_bytes
    );
    if geometry.size_rounded() {
        println!(
            "Note: cache size rounded down from {} bytes to {} bytes",
            geometry.requested_size_bytes, geometry.size_bytes
        );
    }
    println!();
}

/// Prints the first `limit` memory requests of the trace, one per line.
pub fn print_samples(instructions: &[Instruction], limit: usize) {
    println!("----- First {limit} Memory Requests -----");
    instructions
        .iter()
        .flat_map(RequestSequencer::new)
        .take(limit)
        .for_each(|sequenced| println!("{}", sequenced.request));
    println!();
}

/// Machine-readable run record.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    /// Trace that was simulated.
    pub trace_file: &'a Path,
    /// Resolved cache geometry.
    pub geometry: &'a CacheGeometry,
    /// Raw counters.
    pub stats: &'a SimStats,
    /// `hits + misses`.
    pub accesses: u64,
    /// `misses - compulsory_misses`.
    pub conflict_misses: u64,
    /// Hit fraction.
    pub hit_rate: f64,
    /// Miss fraction.
    pub miss_rate: f64,
    /// Cycles per instruction.
    pub cpi: f64,
}

impl<'a> RunReport<'a> {
    /// Collects the record for one finished run.
    pub fn new(trace_file: &'a Path, geometry: &'a CacheGeometry, stats: &'a SimStats) -> Self {
        Self {
            trace_file,
            geometry,
            stats,
            accesses: stats.accesses(),
            conflict_misses: stats.conflict_misses(),
            hit_rate: stats.hit_rate(),
            miss_rate: stats.miss_rate(),
            cpi: stats.cpi(),
        }
    }
}
