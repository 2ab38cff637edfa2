//! Memory Access Types.
//!
//! This module defines the units of work the simulator consumes. These types are used for the following:
//! 1. **Classification:** Distinguishing instruction fetches from data reads and writes.
//! 2. **Requests:** A single memory access with an address and a byte length.
//! 3. **Instructions:** The trace-derived unit grouping one fetch with optional data accesses.

use std::fmt;

use serde::Serialize;

use super::addr::Address;
use super::constants::DATA_ACCESS_BYTES;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AccessType {
    /// Instruction fetch access.
    ///
    /// Variable length, taken from the fetch record of the trace.
    Fetch,

    /// Data read access.
    ///
    /// Always [`DATA_ACCESS_BYTES`] long.
    Read,

    /// Data write access.
    ///
    /// Always [`DATA_ACCESS_BYTES`] long.
    Write,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch => write!(f, "fetch"),
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// One memory access: a starting address, a kind and a length in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MemoryRequest {
    /// First byte accessed.
    pub address: Address,
    /// Kind of access.
    pub kind: AccessType,
    /// Number of bytes accessed, never zero.
    pub length: u32,
}

impl MemoryRequest {
    /// Creates an instruction fetch of `length` bytes.
    ///
    /// A zero length is floored to one byte so the fetch is still serviced.
    pub const fn fetch(address: Address, length: u32) -> Self {
        Self {
            address,
            kind: AccessType::Fetch,
            length: if length == 0 { 1 } else { length },
        }
    }

    /// Creates a data read.
    pub const fn read(address: Address) -> Self {
        Self {
            address,
            kind: AccessType::Read,
            length: DATA_ACCESS_BYTES,
        }
    }

    /// Creates a data write.
    pub const fn write(address: Address) -> Self {
        Self {
            address,
            kind: AccessType::Write,
            length: DATA_ACCESS_BYTES,
        }
    }
}

impl fmt::Display for MemoryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x} ({})", self.address, self.length)
    }
}

/// A decoded trace instruction: one fetch followed by an optional write and an optional read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Instruction {
    /// Instruction fetch, always present.
    pub fetch: MemoryRequest,
    /// Data write, serviced after the fetch.
    pub write: Option<MemoryRequest>,
    /// Data read, serviced last.
    pub read: Option<MemoryRequest>,
}

impl Instruction {
    /// Creates an instruction that only fetches `length` bytes at `address`.
    pub const fn new(address: Address, length: u32) -> Self {
        Self {
            fetch: MemoryRequest::fetch(address, length),
            write: None,
            read: None,
        }
    }

    /// Adds a data write at `address`.
    #[must_use]
    pub const fn with_write(mut self, address: Address) -> Self {
        self.write = Some(MemoryRequest::write(address));
        self
    }

    /// Adds a data read at `address`.
    #[must_use]
    pub const fn with_read(mut self, address: Address) -> Self {
        self.read = Some(MemoryRequest::read(address));
        self
    }

    /// Number of memory requests this instruction yields (1 to 3).
    pub const fn request_count(&self) -> usize {
        1 + self.write.is_some() as usize + self.read.is_some() as usize
    }
}
