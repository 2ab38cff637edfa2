//! Simulation statistics collection and reporting.
//!
//! This module tracks the counters accumulated by the simulation engine. It provides:
//! 1. **Cycles and CPI:** Total cycles, instructions, and cycles per instruction.
//! 2. **Cache outcomes:** Hits, misses, and the compulsory/conflict split.
//! 3. **Request mix:** Counts of fetch, read, and write requests.

use serde::Serialize;

use crate::common::data::AccessType;

/// Simulation statistics structure tracking all counters of one run.
///
/// Every serviced chunk is counted in exactly one of hit, compulsory miss, or
/// conflict miss; only hits and misses are stored and the rest is derived.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total cycles charged.
    pub cycles: u64,
    /// Number of instructions simulated.
    pub instructions: u64,
    /// Chunks that hit in the cache.
    pub hits: u64,
    /// Chunks that missed in the cache.
    pub misses: u64,
    /// Misses that found a free way in their set.
    pub compulsory_misses: u64,
    /// Instruction fetch requests serviced.
    pub fetch_requests: u64,
    /// Data read requests serviced.
    pub read_requests: u64,
    /// Data write requests serviced.
    pub write_requests: u64,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"memory"`, `"requests"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "memory", "requests"];

impl SimStats {
    /// Total cache accesses (`hits + misses`).
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Misses that required an eviction.
    pub const fn conflict_misses(&self) -> u64 {
        self.misses.saturating_sub(self.compulsory_misses)
    }

    /// Fraction of accesses that hit, or 0 when nothing was accessed.
    pub fn hit_rate(&self) -> f64 {
        ratio(self.hits, self.accesses())
    }

    /// Fraction of accesses that missed, or 0 when nothing was accessed.
    pub fn miss_rate(&self) -> f64 {
        ratio(self.misses, self.accesses())
    }

    /// Cycles per instruction, or 0 when no instruction was simulated.
    pub fn cpi(&self) -> f64 {
        ratio(self.cycles, self.instructions)
    }

    /// Total requests serviced, across all kinds.
    pub const fn requests(&self) -> u64 {
        self.fetch_requests + self.read_requests + self.write_requests
    }

    /// Counts one request of `kind`.
    pub(crate) const fn record_request(&mut self, kind: AccessType) {
        match kind {
            AccessType::Fetch => self.fetch_requests += 1,
            AccessType::Read => self.read_requests += 1,
            AccessType::Write => self.write_requests += 1,
        }
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"memory"`, or
    /// `"requests"`. Pass an empty slice to print all sections (same as `print()`).
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);

        println!("----- Results -----");
        if want("summary") {
            println!("Total Instructions:       {}", self.instructions);
            println!("Total Cycles:             {}", self.cycles);
            println!("Cache Hit Rate:           {:.4}%", self.hit_rate() * 100.0);
            println!("Cache Miss Rate:          {:.4}%", self.miss_rate() * 100.0);
            println!("CPI:                      {:.4}", self.cpi());
        }
        if want("memory") {
            println!("Total Cache Accesses:     {}", self.accesses());
            println!("Cache Hits:               {}", self.hits);
            println!("Cache Misses:             {}", self.misses);
            println!("  Compulsory Misses:      {}", self.compulsory_misses);
            println!("  Conflict Misses:        {}", self.conflict_misses());
        }
        if want("requests") {
            let total = self.requests();
            let share = |n: u64| ratio(n, total) * 100.0;
            println!("Memory Requests:          {total}");
            println!(
                "  fetch                  {} ({:.2}%)",
                self.fetch_requests,
                share(self.fetch_requests)
            );
            println!(
                "  read                   {} ({:.2}%)",
                self.read_requests,
                share(self.read_requests)
            );
            println!(
                "  write                  {} ({:.2}%)",
                self.write_requests,
                share(self.write_requests)
            );
        }
        println!();
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
