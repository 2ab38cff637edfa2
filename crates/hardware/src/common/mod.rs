//! Common types used throughout the cache simulator.
//!
//! This module provides the building blocks shared by the cache model, the
//! request sequencer and the simulation engine. It includes:
//! 1. **Addresses:** The 32-bit address type and its tag/index/offset decomposition.
//! 2. **Constants:** Cost-model parameters and accepted configuration ranges.
//! 3. **Memory Access:** Access kinds, memory requests and trace instructions.
//! 4. **Error Handling:** Configuration, sequencing and trace errors.

/// Address type and tag/index/offset decomposition.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{Address, AddressLayout, DecodedAddress};
pub use data::{AccessType, Instruction, MemoryRequest};
pub use error::{ConfigError, SequenceError, SimError, SimResult, TraceError};
