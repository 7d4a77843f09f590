//! Shifting elements inside a live range by copy-assignment.
//!
//! Both directions overwrite already-constructed slots with
//! `Clone::clone_from`, so a panic part way through leaves every slot
//! holding some valid value.

use std::ops::Range;

/// Copy-assign `slots[src]` onto the slots `shift` places to the right,
/// last element first, so an overlapping source is read before it is
/// overwritten.
pub(crate) fn assign_backward<T: Clone>(slots: &mut [T], src: Range<usize>, shift: usize) {
    debug_assert!(src.end + shift <= slots.len());
    for from in src.rev() {
        let (lo, hi) = slots.split_at_mut(from + shift);
        hi[0].clone_from(&lo[from]);
    }
}

/// Copy-assign `slots[src]` onto the slots `shift` places to the left,
/// first element first.
pub(crate) fn assign_forward<T: Clone>(slots: &mut [T], src: Range<usize>, shift: usize) {
    debug_assert!(src.start >= shift && src.end <= slots.len());
    for from in src {
        let (lo, hi) = slots.split_at_mut(from);
        lo[from - shift].clone_from(&hi[0]);
    }
}

/// Copy-assign `value` onto every slot.
pub(crate) fn assign_fill<T: Clone>(slots: &mut [T], value: &T) {
    for slot in slots {
        slot.clone_from(value);
    }
}
