//! Cache Model Unit Tests.
//!
//! Verifies hit/miss classification, the serviced byte count, installation
//! into free ways before any eviction, and that an installed line keeps
//! hitting under every policy until it is evicted.
//!
//! The model is constructed directly from a resolved geometry; no simulator
//! is needed.

use cachesim_core::cache::{AccessOutcome, CacheModel, Installed};
use cachesim_core::config::{CacheConfig, ReplacementPolicy as PolicyType};
use rstest::rstest;

use crate::common::harness::geometry;

// ──────────────────────────────────────────────────────────
// Helper: build a simple test cache
// ──────────────────────────────────────────────────────────

/// 1 KB, 16-byte blocks, 2-way: 32 sets, so lines 0x200 apart share a set.
const SET_STRIDE: u32 = 0x200;

fn model(policy: PolicyType) -> CacheModel {
    CacheModel::new(geometry(1, 16, 2, policy)).unwrap()
}

// ══════════════════════════════════════════════════════════
// 1. Classification
// ══════════════════════════════════════════════════════════

#[test]
fn cold_read_is_compulsory_miss() {
    let mut cache = model(PolicyType::RoundRobin);
    let result = cache.read(0x0, 8, 1);
    assert_eq!(result.outcome, AccessOutcome::CompulsoryMiss);
    assert_eq!(result.serviced, 16);
}

#[test]
fn installed_line_hits() {
    let mut cache = model(PolicyType::RoundRobin);
    let _ = cache.install(0x100, 1);
    assert!(cache.contains(0x10F));
    let result = cache.read(0x104, 4, 2);
    assert_eq!(result.outcome, AccessOutcome::Hit);
    assert!(result.outcome.is_hit());
}

#[test]
fn miss_in_full_set_is_conflict() {
    let mut cache = model(PolicyType::RoundRobin);
    let _ = cache.install(0, 1);
    let _ = cache.install(SET_STRIDE, 2);
    assert_eq!(cache.read(2 * SET_STRIDE, 4, 3).outcome, AccessOutcome::ConflictMiss);
}

/// A full set elsewhere does not make a miss in an empty set a conflict.
#[test]
fn classification_is_per_set() {
    let mut cache = model(PolicyType::RoundRobin);
    let _ = cache.install(0, 1);
    let _ = cache.install(SET_STRIDE, 2);
    assert_eq!(cache.read(0x10, 4, 3).outcome, AccessOutcome::CompulsoryMiss);
}

#[rstest]
#[case(0x00, 16)]
#[case(0x01, 15)]
#[case(0x0E, 2)]
#[case(0x0F, 1)]
fn serviced_bytes_run_to_block_end(#[case] addr: u32, #[case] serviced: u32) {
    let mut cache = model(PolicyType::RoundRobin);
    assert_eq!(cache.read(addr, 64, 1).serviced, serviced);
    let _ = cache.install(addr, 1);
    assert_eq!(cache.read(addr, 64, 2).serviced, serviced);
}

#[test]
fn hit_refreshes_stamp() {
    let mut cache = model(PolicyType::Lru);
    let placed = cache.install(0x40, 3);
    let _ = cache.read(0x40, 4, 17);
    let way = cache.set(placed.set).unwrap().way(placed.way).unwrap();
    assert_eq!(way.last_used, 17);
}

#[test]
fn miss_does_not_modify_state() {
    let mut cache = model(PolicyType::Lru);
    let _ = cache.read(0x40, 4, 1);
    assert_eq!(cache.resident_lines(), 0);
}

// ══════════════════════════════════════════════════════════
// 2. Installation
// ══════════════════════════════════════════════════════════

#[test]
fn install_fills_free_ways_in_order() {
    let mut cache = model(PolicyType::Random);
    let first = cache.install(0, 1);
    let second = cache.install(SET_STRIDE, 2);
    assert_eq!(
        first,
        Installed {
            set: 0,
            way: 0,
            evicted: None,
        }
    );
    assert_eq!(second.way, 1);
    assert_eq!(second.evicted, None);
}

#[test]
fn install_into_full_set_reports_victim_base() {
    let mut cache = model(PolicyType::RoundRobin);
    let _ = cache.install(0x04, 1);
    let _ = cache.install(SET_STRIDE + 0x08, 2);
    let third = cache.install(2 * SET_STRIDE, 3);
    assert_eq!(third.way, 0);
    assert_eq!(third.evicted, Some(0));
    assert!(!cache.contains(0));
    assert!(cache.contains(SET_STRIDE));
}

#[test]
fn reinstalling_resident_line_only_refreshes() {
    let mut cache = model(PolicyType::RoundRobin);
    let first = cache.install(0x80, 1);
    let again = cache.install(0x84, 5);
    assert_eq!(again.way, first.way);
    assert_eq!(again.evicted, None);
    assert_eq!(cache.resident_lines(), 1);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(4)]
#[case(8)]
#[case(16)]
fn round_robin_evicts_in_way_order(#[case] ways: u32) {
    let mut cache = CacheModel::new(geometry(1, 16, ways, PolicyType::RoundRobin)).unwrap();
    let stride = 1024 / ways;
    let mut now = 0;
    for k in 0..ways {
        now += 1;
        let _ = cache.install(k * stride, now);
    }

    let victims: Vec<usize> = (ways..3 * ways)
        .map(|k| {
            now += 1;
            cache.install(k * stride, now).way
        })
        .collect();
    let expected: Vec<usize> = (0..ways as usize).chain(0..ways as usize).collect();
    assert_eq!(victims, expected);
}

#[test]
fn reset_empties_cache() {
    let mut cache = CacheModel::from_config(&CacheConfig {
        size_kb: 1,
        ..CacheConfig::default()
    })
    .unwrap();
    let _ = cache.install(0, 1);
    cache.reset();
    assert_eq!(cache.resident_lines(), 0);
    assert_eq!(cache.read(0, 4, 2).outcome, AccessOutcome::CompulsoryMiss);
}

// ══════════════════════════════════════════════════════════
// 3. Residency until eviction
// ══════════════════════════════════════════════════════════

/// An installed line reads as a hit until an install in its set evicts it,
/// after which it reads as a conflict miss.
#[rstest]
#[case(PolicyType::RoundRobin)]
#[case(PolicyType::Random)]
#[case(PolicyType::Lru)]
fn installed_line_hits_until_evicted(#[case] policy: PolicyType) {
    let mut cache = CacheModel::new(geometry(1, 16, 4, policy)).unwrap();
    let stride = 1024 / 4;
    let target = 0x30;
    let mut now = 1;
    let _ = cache.install(target, now);
    now += 1;
    assert_eq!(cache.read(target, 4, now).outcome, AccessOutcome::Hit);

    let mut evicted = false;
    for k in 1..1000 {
        // `contains` leaves recency alone, so LRU still ages the target.
        assert!(cache.contains(target));
        now += 1;
        let placed = cache.install(target + k * stride, now);
        if placed.evicted == Some(target) {
            evicted = true;
            break;
        }
    }

    assert!(evicted, "{policy} never evicted the target line");
    assert!(!cache.contains(target));
    assert_eq!(cache.read(target, 4, now + 1).outcome, AccessOutcome::ConflictMiss);
}
