//! Unit tests for simulator-wide constants.
//!
//! This module verifies that the cost-model constants keep their reference
//! values and that the accepted ranges are consistent with each other.

use cachesim_core::common::constants::*;

#[test]
fn test_cost_model_reference_values() {
    assert_eq!(DEFAULT_EXECUTION_CYCLES, 2);
    assert_eq!(DEFAULT_MEM_ACCESS_CYCLES, 3);
    assert_eq!(BUS_SIZE, 4);
}

#[test]
fn test_data_access_is_one_bus_word() {
    assert_eq!(DATA_ACCESS_BYTES, BUS_SIZE);
}

#[test]
fn test_block_range_is_powers_of_two() {
    assert!(MIN_BLOCK_BYTES.is_power_of_two());
    assert!(MAX_BLOCK_BYTES.is_power_of_two());
    assert!(MIN_BLOCK_BYTES < MAX_BLOCK_BYTES);
}

#[test]
fn test_supported_ways_are_powers_of_two() {
    assert!(SUPPORTED_WAYS.iter().all(|w| w.is_power_of_two()));
    assert_eq!(SUPPORTED_WAYS, [1, 2, 4, 8, 16]);
}

#[test]
fn test_largest_cache_fits_address_space() {
    // 8 MiB with the smallest block leaves room for a tag.
    let bytes = u64::from(MAX_CACHE_KB) * 1024;
    let blocks = bytes / u64::from(MIN_BLOCK_BYTES);
    assert!(u64::from(ADDRESS_BITS) > u64::from(blocks.trailing_zeros()) + 2);
    assert_eq!(MIN_CACHE_KB, 1);
}
