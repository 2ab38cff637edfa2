//! Request Sequencer.
//!
//! Turns one [`Instruction`] into its ordered memory requests: the fetch,
//! then the write if present, then the read if present. Each request is
//! reported together with the number of requests still to come.

use crate::common::data::{Instruction, MemoryRequest};
use crate::common::error::SequenceError;

/// A request paired with the count of requests after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequencedRequest {
    /// The request to service.
    pub request: MemoryRequest,
    /// Requests left in the instruction after this one.
    pub remaining: usize,
}

/// Lazily yields the requests of one instruction.
///
/// A fresh sequencer is built per instruction; nothing is shared between them.
#[derive(Clone, Debug)]
pub struct RequestSequencer<'a> {
    instruction: &'a Instruction,
    position: usize,
}

impl<'a> RequestSequencer<'a> {
    /// Starts sequencing `instruction` from its fetch.
    pub const fn new(instruction: &'a Instruction) -> Self {
        Self {
            instruction,
            position: 0,
        }
    }

    /// Requests not yet yielded.
    pub const fn remaining(&self) -> usize {
        self.instruction.request_count().saturating_sub(self.position)
    }

    /// Yields the next request.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::Exhausted`] once every request has been yielded.
    pub fn advance(&mut self) -> Result<SequencedRequest, SequenceError> {
        let request = self.nth_present(self.position).ok_or(SequenceError::Exhausted)?;
        self.position += 1;
        Ok(SequencedRequest {
            request,
            remaining: self.remaining(),
        })
    }

    fn nth_present(&self, n: usize) -> Option<MemoryRequest> {
        std::iter::once(Some(self.instruction.fetch))
            .chain([self.instruction.write, self.instruction.read])
            .flatten()
            .nth(n)
    }
}

impl Iterator for RequestSequencer<'_> {
    type Item = SequencedRequest;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for RequestSequencer<'_> {}
