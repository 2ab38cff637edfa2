//! # Error Tests
//!
//! This module contains unit tests for the error messages and the
//! conversions between the error layers.

use std::error::Error;
use std::path::PathBuf;

use cachesim_core::common::error::{ConfigError, SequenceError, SimError, TraceError};

#[test]
fn test_config_error_messages_name_the_value() {
    assert!(ConfigError::CacheSizeOutOfRange(9000).to_string().contains("9000"));
    assert!(ConfigError::BlockSizeNotPowerOfTwo(24).to_string().contains("24"));
    assert!(
        ConfigError::UnsupportedAssociativity(3)
            .to_string()
            .contains("1, 2, 4, 8 or 16")
    );
    assert!(ConfigError::UnknownPolicy("FIFO".into()).to_string().contains("FIFO"));
}

#[test]
fn test_data_before_fetch_reports_line() {
    let err = SequenceError::DataBeforeFetch { line: 7 };
    assert!(err.to_string().contains("line 7"));
}

#[test]
fn test_sequence_error_is_transparent_in_trace_error() {
    let err: TraceError = SequenceError::DataBeforeFetch { line: 3 }.into();
    assert_eq!(
        err.to_string(),
        SequenceError::DataBeforeFetch { line: 3 }.to_string()
    );
}

#[test]
fn test_trace_io_error_keeps_source() {
    let err = TraceError::Io {
        path: PathBuf::from("missing.trc"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    };
    assert!(err.to_string().contains("missing.trc"));
    assert!(err.source().is_some());
}

#[test]
fn test_sim_error_wraps_each_layer() {
    let config: SimError = ConfigError::UnsupportedAssociativity(3).into();
    assert!(matches!(config, SimError::Config(_)));

    let sequence: SimError = SequenceError::Exhausted.into();
    assert!(matches!(sequence, SimError::Sequence(SequenceError::Exhausted)));

    let trace: SimError = TraceError::Malformed {
        line: 1,
        reason: "short".into(),
    }
    .into();
    assert!(trace.to_string().contains("line 1"));
}
