//! Simulation engine and trace ingestion.
//!
//! Provides the trace loader that materializes instructions, the sequencer
//! that orders each instruction's memory requests, and the simulator that
//! services them against the cache model.

/// Ordering of an instruction's memory requests.
pub mod sequencer;

/// The simulation engine.
pub mod simulator;

/// Text trace parsing and loading.
pub mod trace;

pub use sequencer::{RequestSequencer, SequencedRequest};
pub use simulator::{Simulator, simulate};
pub use trace::{load_trace, parse_trace};
