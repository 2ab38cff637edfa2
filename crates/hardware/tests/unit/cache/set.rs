//! Cache Set Tests.
//!
//! Verifies way bookkeeping within a single set: lookup, free-way search,
//! fills, stamps, and the round-robin cursor.

use cachesim_core::cache::set::{CacheSet, Way};

#[test]
fn new_set_is_empty() {
    let set = CacheSet::new(4);
    assert_eq!(set.associativity(), 4);
    assert_eq!(set.occupancy(), 0);
    assert_eq!(set.free_way(), Some(0));
    assert!(!set.is_full());
    assert!(set.ways().iter().all(|w| !w.valid));
}

/// An invalid way never matches, even when its stale tag does.
#[test]
fn lookup_ignores_invalid_ways() {
    let set = CacheSet::new(2);
    assert_eq!(set.lookup(0), None);
}

#[test]
fn fill_returns_previous_contents() {
    let mut set = CacheSet::new(2);
    assert_eq!(set.fill(1, 0xAB, 5), Some(Way::default()));
    assert_eq!(
        set.fill(1, 0xCD, 9),
        Some(Way {
            tag: 0xAB,
            valid: true,
            last_used: 5,
        })
    );
    assert_eq!(set.lookup(0xCD), Some(1));
    assert_eq!(set.lookup(0xAB), None);
}

#[test]
fn fill_out_of_range_is_ignored() {
    let mut set = CacheSet::new(2);
    assert_eq!(set.fill(2, 0xAB, 1), None);
    assert_eq!(set.occupancy(), 0);
}

#[test]
fn free_way_is_first_invalid_in_storage_order() {
    let mut set = CacheSet::new(4);
    let _ = set.fill(0, 1, 1);
    let _ = set.fill(2, 2, 2);
    assert_eq!(set.free_way(), Some(1));
    let _ = set.fill(1, 3, 3);
    assert_eq!(set.free_way(), Some(3));
    let _ = set.fill(3, 4, 4);
    assert_eq!(set.free_way(), None);
    assert!(set.is_full());
    assert_eq!(set.occupancy(), 4);
}

#[test]
fn touch_refreshes_stamp_only() {
    let mut set = CacheSet::new(2);
    let _ = set.fill(0, 0x42, 3);
    set.touch(0, 11);
    let way = set.way(0).unwrap();
    assert_eq!(way.last_used, 11);
    assert_eq!(way.tag, 0x42);
    assert!(way.valid);
}

#[test]
fn cursor_wraps_at_associativity() {
    let mut set = CacheSet::new(3);
    let visited: Vec<usize> = (0..7).map(|_| set.advance_cursor()).collect();
    assert_eq!(visited, vec![0, 1, 2, 0, 1, 2, 0]);
    assert_eq!(set.cursor(), 1);
}
