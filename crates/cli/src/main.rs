//! Trace-driven cache simulator CLI.
//!
//! This binary runs one trace through one cache configuration. It performs:
//! 1. **Configuration:** From flags, or from a JSON file with `--config`.
//! 2. **Simulation:** Loads the whole trace, optionally truncates it, and runs it.
//! 3. **Reporting:** Prints the header, calculated values and results, or a JSON record with `--json`.

mod report;

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use cachesim_core::config::{CacheConfig, ReplacementPolicy, TimingConfig};
use cachesim_core::sim::{Simulator, load_trace};
use cachesim_core::stats::STATS_SECTIONS;
use clap::Parser;
use clap::builder::PossibleValuesParser;
use tracing_subscriber::EnvFilter;

use crate::report::RunReport;

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator",
    long_about = "Run a memory-access trace through a single-level set-associative cache and report hit rate, miss rate and CPI.\n\nExamples:\n  sim -f traces/Trace1.trc -s 1024 -b 16 -a 2 -r RR\n  sim -f traces/Trace1.trc --config cache.json --json"
)]
struct Cli {
    /// Trace file to simulate.
    #[arg(short = 'f', long = "file", value_name = "TRACE")]
    trace: PathBuf,

    /// Cache size in KB (1 to 8192).
    #[arg(
        short = 's',
        long = "size",
        value_name = "KB",
        required_unless_present = "config",
        value_parser = clap::value_parser!(u32).range(1..=8192)
    )]
    size_kb: Option<u32>,

    /// Block size in bytes (power of two, 4 to 64).
    #[arg(
        short = 'b',
        long = "block",
        value_name = "BYTES",
        required_unless_present = "config"
    )]
    block_bytes: Option<u32>,

    /// Associativity (1, 2, 4, 8 or 16).
    #[arg(
        short = 'a',
        long = "assoc",
        value_name = "WAYS",
        required_unless_present = "config"
    )]
    ways: Option<u32>,

    /// Replacement policy (RR, RND or LRU).
    #[arg(
        short = 'r',
        long = "policy",
        value_name = "POLICY",
        required_unless_present = "config"
    )]
    policy: Option<ReplacementPolicy>,

    /// JSON cache configuration, used instead of the size/block/assoc/policy flags.
    #[arg(long, value_name = "JSON", conflicts_with_all = ["size_kb", "block_bytes", "ways", "policy"])]
    config: Option<PathBuf>,

    /// Seed for the random replacement policy.
    #[arg(long)]
    seed: Option<u64>,

    /// Simulate only the first N instructions.
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Print results for these sections only (summary, memory, requests).
    #[arg(
        long,
        value_delimiter = ',',
        value_parser = PossibleValuesParser::new(STATS_SECTIONS.iter().copied())
    )]
    sections: Vec<String>,

    /// Emit a JSON record instead of the text report.
    #[arg(long)]
    json: bool,

    /// Print sample requests and debug logs.
    #[arg(short, long)]
    debug: bool,

    /// Number of sample requests printed in debug mode.
    #[arg(long, default_value_t = 20)]
    samples: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n[!] FATAL: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("    caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = cache_config(cli)?;
    let geometry = config.resolve()?;

    let mut instructions = load_trace(&cli.trace)?;
    tracing::info!(
        trace = %cli.trace.display(),
        instructions = instructions.len(),
        "trace loaded"
    );
    if let Some(limit) = cli.limit.filter(|&limit| limit < instructions.len()) {
        tracing::info!(
            limit,
            dropped = instructions.len() - limit,
            "truncating trace"
        );
        instructions.truncate(limit);
    }

    if !cli.json {
        let command_line: Vec<String> = std::env::args().collect();
        report::print_header(&command_line, &cli.trace, &geometry);
        report::print_calculated(&geometry);
    }

    let mut simulator = Simulator::new(geometry.clone(), TimingConfig::default())?;
    let stats = simulator.run(&instructions);

    if cli.json {
        let record = RunReport::new(&cli.trace, &geometry, stats);
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    stats.print_sections(&cli.sections);
    if cli.debug {
        report::print_samples(&instructions, cli.samples);
    }
    Ok(())
}

fn cache_config(cli: &Cli) -> Result<CacheConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("could not read config '{}': {e}", path.display()))?;
            serde_json::from_str::<CacheConfig>(&text)?
        }
        None => {
            let defaults = CacheConfig::default();
            CacheConfig {
                size_kb: cli.size_kb.unwrap_or(defaults.size_kb),
                block_bytes: cli.block_bytes.unwrap_or(defaults.block_bytes),
                ways: cli.ways.unwrap_or(defaults.ways),
                policy: cli.policy.unwrap_or(defaults.policy),
                seed: defaults.seed,
            }
        }
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    Ok(config)
}
