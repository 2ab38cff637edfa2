//! # Memory Request Tests
//!
//! Verifies request construction, the fixed data access length, the
//! zero-length fetch floor, and the textual form used by sample output.

use cachesim_core::common::data::{AccessType, Instruction, MemoryRequest};

#[test]
fn data_accesses_are_four_bytes() {
    assert_eq!(MemoryRequest::read(0x10).length, 4);
    assert_eq!(MemoryRequest::write(0x10).length, 4);
    assert_eq!(MemoryRequest::read(0x10).kind, AccessType::Read);
    assert_eq!(MemoryRequest::write(0x10).kind, AccessType::Write);
}

#[test]
fn fetch_keeps_declared_length() {
    let fetch = MemoryRequest::fetch(0x7c80_9767, 7);
    assert_eq!(fetch.kind, AccessType::Fetch);
    assert_eq!(fetch.length, 7);
}

/// Zero-length fetches are serviced as one byte rather than dropped.
#[test]
fn zero_length_fetch_is_floored_to_one() {
    assert_eq!(MemoryRequest::fetch(0x40, 0).length, 1);
    assert_eq!(Instruction::new(0x40, 0).fetch.length, 1);
}

#[test]
fn display_matches_sample_format() {
    assert_eq!(MemoryRequest::fetch(0x7c80_9767, 3).to_string(), "0x7c809767 (3)");
    assert_eq!(MemoryRequest::read(0).to_string(), "0x0 (4)");
}

#[test]
fn request_count_follows_present_accesses() {
    let base = Instruction::new(0x100, 2);
    assert_eq!(base.request_count(), 1);
    assert_eq!(base.with_write(0x200).request_count(), 2);
    assert_eq!(base.with_read(0x300).request_count(), 2);
    assert_eq!(base.with_write(0x200).with_read(0x300).request_count(), 3);
}

#[test]
fn access_type_display() {
    assert_eq!(AccessType::Fetch.to_string(), "fetch");
    assert_eq!(AccessType::Read.to_string(), "read");
    assert_eq!(AccessType::Write.to_string(), "write");
}
