//! Trace Loading.
//!
//! This module turns a text trace into the instruction list consumed by the
//! simulator. It performs:
//! 1. **File loading:** Reads the whole trace into memory before simulation starts.
//! 2. **Record parsing:** Extracts fixed-column fields from fetch (`E`) and data (`d`) records.
//! 3. **Pairing:** Completes each pending fetch with the data record that follows it.
//!
//! A fetch record looks like `EIP (04): 7c809767 ...`: columns 5..7 hold the
//! length and columns 10..18 the address, both hexadecimal. A data record
//! looks like `dstM: 0012f4c8 ... srcM: 00000000 ...`: columns 6..14 hold the
//! write address and columns 33..41 the read address, where all zeroes means
//! the access is absent. Any other line is ignored.

use std::fs;
use std::ops::Range;
use std::path::Path;

use crate::common::addr::Address;
use crate::common::data::Instruction;
use crate::common::error::{SequenceError, TraceError};

/// Columns of the fetch length in a fetch record.
const FETCH_LENGTH: Range<usize> = 5..7;
/// Columns of the fetch address in a fetch record.
const FETCH_ADDRESS: Range<usize> = 10..18;
/// Columns of the write address in a data record.
const WRITE_ADDRESS: Range<usize> = 6..14;
/// Columns of the read address in a data record.
const READ_ADDRESS: Range<usize> = 33..41;
/// Field value marking an absent data access.
const ABSENT: &str = "00000000";

/// Reads and parses the trace at `path`.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if the file cannot be read, otherwise any error
/// from [`parse_trace`].
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<Instruction>, TraceError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let instructions = parse_trace(&text)?;
    tracing::debug!(
        path = %path.display(),
        instructions = instructions.len(),
        "loaded trace"
    );
    Ok(instructions)
}

/// Parses trace text into instructions, preserving record order.
///
/// A fetch that is not followed by a data record (because another fetch or
/// the end of the trace comes first) becomes a fetch-only instruction.
///
/// # Errors
///
/// Returns [`TraceError::Malformed`] for a truncated record or a non-numeric
/// field, and [`TraceError::Sequence`] for a data record with no pending fetch.
pub fn parse_trace(text: &str) -> Result<Vec<Instruction>, TraceError> {
    let mut instructions = Vec::new();
    let mut pending: Option<Instruction> = None;
    let mut ignored = 0usize;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim_end();
        match line.as_bytes().first() {
            Some(b'E') => {
                if let Some(previous) = pending.replace(parse_fetch(line, line_no)?) {
                    instructions.push(previous);
                }
            }
            Some(b'd') => {
                let fetch = pending
                    .take()
                    .ok_or(SequenceError::DataBeforeFetch { line: line_no })?;
                instructions.push(complete(fetch, line, line_no)?);
            }
            _ => ignored += 1,
        }
    }
    instructions.extend(pending);

    tracing::debug!(
        instructions = instructions.len(),
        ignored_lines = ignored,
        "parsed trace"
    );
    Ok(instructions)
}

fn parse_fetch(line: &str, line_no: usize) -> Result<Instruction, TraceError> {
    let length_text = field(line, FETCH_LENGTH, line_no, "fetch length")?;
    if !length_text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(malformed(
            line_no,
            format!("fetch length '{length_text}' is not hexadecimal"),
        ));
    }
    let length = u32::from_str_radix(length_text, 16)
        .map_err(|e| malformed(line_no, format!("fetch length '{length_text}': {e}")))?;
    if length == 0 {
        tracing::debug!(line = line_no, "zero-length fetch serviced as one byte");
    }
    let address = hex_address(line, FETCH_ADDRESS, line_no, "fetch address")?;
    Ok(Instruction::new(address, length))
}

fn complete(
    mut instruction: Instruction,
    line: &str,
    line_no: usize,
) -> Result<Instruction, TraceError> {
    if let Some(address) = data_address(line, WRITE_ADDRESS, line_no, "write address")? {
        instruction = instruction.with_write(address);
    }
    if let Some(address) = data_address(line, READ_ADDRESS, line_no, "read address")? {
        instruction = instruction.with_read(address);
    }
    Ok(instruction)
}

fn data_address(
    line: &str,
    columns: Range<usize>,
    line_no: usize,
    name: &str,
) -> Result<Option<Address>, TraceError> {
    if field(line, columns.clone(), line_no, name)? == ABSENT {
        return Ok(None);
    }
    hex_address(line, columns, line_no, name).map(Some)
}

fn hex_address(
    line: &str,
    columns: Range<usize>,
    line_no: usize,
    name: &str,
) -> Result<Address, TraceError> {
    let text = field(line, columns, line_no, name)?;
    if !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(malformed(
            line_no,
            format!("{name} '{text}' is not hexadecimal"),
        ));
    }
    Address::from_str_radix(text, 16)
        .map_err(|e| malformed(line_no, format!("{name} '{text}': {e}")))
}

fn field<'a>(
    line: &'a str,
    columns: Range<usize>,
    line_no: usize,
    name: &str,
) -> Result<&'a str, TraceError> {
    let (start, end) = (columns.start, columns.end);
    line.get(columns).ok_or_else(|| {
        malformed(
            line_no,
            format!("record too short for {name} at columns {start}..{end}"),
        )
    })
}

fn malformed(line: usize, reason: String) -> TraceError {
    TraceError::Malformed { line, reason }
}
