//! Integration test: behavior when the allocator refuses or an element
//! operation panics part way through a container operation.
//!
//! Reallocating paths must leave the vector exactly as it was. In-place
//! shifting paths may leave it partly modified, but it must stay valid:
//! every element alive exactly once and every block returned on drop.

use std::panic::{catch_unwind, AssertUnwindSafe};

use contig_test_utils::{Probe, ProbeLedger, TrackingAllocator};
use contig_vec::{ContigError, Vector};

fn values(v: &Vector<Probe, TrackingAllocator>) -> Vec<i64> {
    v.iter().map(Probe::value).collect()
}

fn probes(ledger: &ProbeLedger, alloc: &TrackingAllocator, items: &[i64]) -> Vector<Probe, TrackingAllocator> {
    let mut v = Vector::try_with_capacity_in(items.len(), alloc.clone()).unwrap();
    for item in ledger.make_all(items) {
        v.push(item).unwrap();
    }
    v
}

/// The externally observable state of a vector of plain integers.
fn snapshot(v: &Vector<u64, TrackingAllocator>) -> (Vec<u64>, usize, *const u64) {
    (v.as_slice().to_vec(), v.capacity(), v.as_ptr())
}

// ── allocation refusal ───────────────────────────────────────

#[test]
fn refused_growth_on_append_changes_nothing() {
    let alloc = TrackingAllocator::new();
    let mut v = Vector::new_in(alloc.clone());
    for i in 0..4u64 {
        v.push(i).unwrap();
    }
    let before = snapshot(&v);

    alloc.fail_next();
    let err = v.push(99).unwrap_err();
    assert_eq!(err, ContigError::AllocationFailure { bytes: 64, align: 8 });
    assert!(err.is_allocation());
    assert_eq!(snapshot(&v), before);
    assert_eq!(alloc.live_blocks(), 1);

    v.push(99).unwrap();
    assert_eq!(v.as_slice(), &[0, 1, 2, 3, 99]);
}

#[test]
fn refused_reallocating_insert_changes_nothing() {
    let alloc = TrackingAllocator::new();
    let mut v = Vector::try_with_capacity_in(3, alloc.clone()).unwrap();
    v.insert_slice(0, &[1u64, 2, 3]).unwrap();
    let before = snapshot(&v);

    alloc.fail_next();
    assert!(v.insert(1, 7).is_err());
    alloc.fail_next();
    assert!(v.insert_fill(1, 4, &7).is_err());
    alloc.fail_next();
    assert!(v.insert_slice(0, &[8, 9]).is_err());
    alloc.fail_next();
    assert!(v.insert_iter(3, [5u64, 6]).is_err());
    assert_eq!(snapshot(&v), before);
}

#[test]
fn refused_reserve_and_assign_change_nothing() {
    let alloc = TrackingAllocator::new();
    let mut v = Vector::try_with_capacity_in(2, alloc.clone()).unwrap();
    v.push(1u64).unwrap();
    v.push(2).unwrap();
    let before = snapshot(&v);

    alloc.fail_next();
    assert!(v.reserve(100).is_err());
    alloc.fail_next();
    assert!(v.assign_fill(10, &0).is_err());
    alloc.fail_next();
    assert!(v.assign_slice(&[0; 5]).is_err());
    alloc.fail_next();
    assert!(v.assign_iter(0..5u64).is_err());
    assert_eq!(snapshot(&v), before);
    assert_eq!(alloc.live_blocks(), 1);
}

#[test]
fn unrepresentable_capacity_is_reported_before_allocating() {
    let alloc = TrackingAllocator::new();
    let result = Vector::<u64, _>::try_with_capacity_in(usize::MAX, alloc.clone());
    assert!(matches!(result, Err(ContigError::CapacityOverflow { .. })));

    let mut v = Vector::new_in(alloc.clone());
    v.push(1u32).unwrap();
    let attempts = alloc.attempts();
    assert!(v.reserve(usize::MAX).is_err());
    assert_eq!(alloc.attempts(), attempts);
    assert_eq!(v.as_slice(), &[1]);
}

// ── element copy failure during reallocation ─────────────────

#[test]
fn panicking_copy_during_growth_rolls_back() {
    let ledger = ProbeLedger::new();
    let alloc = TrackingAllocator::new();
    let mut v = probes(&ledger, &alloc, &[1, 2, 3, 4]);
    let (capacity, block) = (v.capacity(), v.as_ptr());

    ledger.panic_on_clone(3);
    let extra = ledger.make(5);
    let failed = catch_unwind(AssertUnwindSafe(|| v.push(extra)));
    assert!(failed.is_err());

    assert_eq!(values(&v), [1, 2, 3, 4]);
    assert_eq!((v.capacity(), v.as_ptr()), (capacity, block));
    assert_eq!(ledger.live(), 4);
    assert_eq!(alloc.live_blocks(), 1);
}

#[test]
fn panicking_copy_during_reallocating_insert_rolls_back() {
    let ledger = ProbeLedger::new();
    let alloc = TrackingAllocator::new();
    let mut v = probes(&ledger, &alloc, &[1, 2, 3]);
    let fill = ledger.make(0);

    ledger.panic_on_clone(4);
    let failed = catch_unwind(AssertUnwindSafe(|| v.insert_fill(1, 2, &fill)));
    assert!(failed.is_err());

    assert_eq!(values(&v), [1, 2, 3]);
    assert_eq!(v.capacity(), 3);
    assert_eq!(ledger.live(), 4);
    assert_eq!(alloc.live_blocks(), 1);
}

#[test]
fn panicking_copy_during_reserve_and_assign_rolls_back() {
    let ledger = ProbeLedger::new();
    let alloc = TrackingAllocator::new();
    let mut v = probes(&ledger, &alloc, &[1, 2, 3]);
    let fill = ledger.make(0);
    let source = ledger.make_all(&[7, 8, 9, 10, 11]);
    let before = (v.capacity(), v.as_ptr());
    let live = ledger.live();

    ledger.panic_on_clone(2);
    assert!(catch_unwind(AssertUnwindSafe(|| v.reserve(10))).is_err());
    assert_eq!(values(&v), [1, 2, 3]);
    assert_eq!((v.capacity(), v.as_ptr()), before);
    assert_eq!(alloc.live_blocks(), 1);
    assert_eq!(ledger.live(), live);

    ledger.panic_on_clone(4);
    assert!(catch_unwind(AssertUnwindSafe(|| v.assign_fill(8, &fill))).is_err());
    assert_eq!(values(&v), [1, 2, 3]);
    assert_eq!((v.capacity(), v.as_ptr()), before);
    assert_eq!(alloc.live_blocks(), 1);
    assert_eq!(ledger.live(), live);

    ledger.panic_on_clone(3);
    assert!(catch_unwind(AssertUnwindSafe(|| v.assign_slice(&source))).is_err());
    assert_eq!(values(&v), [1, 2, 3]);
    assert_eq!((v.capacity(), v.as_ptr()), before);
    assert_eq!(alloc.live_blocks(), 1);
    assert_eq!(ledger.live(), live);
}

#[test]
fn panicking_copy_during_clone_leaks_nothing() {
    let ledger = ProbeLedger::new();
    let alloc = TrackingAllocator::new();
    let v = probes(&ledger, &alloc, &[1, 2, 3]);

    ledger.panic_on_clone(2);
    let failed = catch_unwind(AssertUnwindSafe(|| v.clone()));
    assert!(failed.is_err());
    assert_eq!(ledger.live(), 3);
    assert_eq!(alloc.live_blocks(), 1);
}

// ── element failure while shifting in place ──────────────────

#[test]
fn panicking_assign_during_in_place_insert_leaves_valid_vector() {
    let ledger = ProbeLedger::new();
    let alloc = TrackingAllocator::new();
    let mut v = Vector::try_with_capacity_in(8, alloc.clone()).unwrap();
    for item in ledger.make_all(&[1, 2, 3, 4]) {
        v.push(item).unwrap();
    }

    ledger.panic_on_assign(2);
    let new = ledger.make(9);
    let failed = catch_unwind(AssertUnwindSafe(|| v.insert(0, new)));
    assert!(failed.is_err());

    // The trailing copy was made and one slot shifted before the failure.
    assert_eq!(values(&v), [1, 2, 3, 3, 4]);
    assert_eq!(ledger.live(), 5);
    drop(v);
    assert_eq!(ledger.live(), 0);
    assert_eq!(alloc.live_blocks(), 0);
}

#[test]
fn panicking_assign_during_erase_leaves_valid_vector() {
    let ledger = ProbeLedger::new();
    let alloc = TrackingAllocator::new();
    let mut v = probes(&ledger, &alloc, &[1, 2, 3, 4, 5]);

    ledger.panic_on_assign(2);
    let failed = catch_unwind(AssertUnwindSafe(|| v.erase(0)));
    assert!(failed.is_err());

    assert_eq!(v.len(), 5);
    assert_eq!(values(&v), [2, 2, 3, 4, 5]);
    assert_eq!(v.capacity(), 5);
    drop(v);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn panicking_assign_during_in_place_assign_leaves_valid_vector() {
    let ledger = ProbeLedger::new();
    let alloc = TrackingAllocator::new();
    let mut v = probes(&ledger, &alloc, &[1, 2, 3]);
    let source = ledger.make_all(&[7, 8]);

    ledger.panic_on_assign(2);
    let failed = catch_unwind(AssertUnwindSafe(|| v.assign_slice(&source)));
    assert!(failed.is_err());

    assert_eq!(values(&v), [7, 2, 3]);
    drop(v);
    drop(source);
    assert_eq!(ledger.live(), 0);
    assert_eq!(alloc.live_blocks(), 0);
}
