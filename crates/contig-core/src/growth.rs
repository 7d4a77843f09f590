//! Growth policy for replacement buffers.
//!
//! A full container grows geometrically: appending to a buffer holding
//! `len` elements replaces it with one of `max(1, 2 * len)` slots, so `k`
//! appends from empty copy `O(k)` elements in total. Bulk inserts that do
//! not fit grow to `len + max(len, n)`, which keeps repeated bulk inserts
//! amortized per element rather than per call.

use crate::error::ContigError;

/// Capacity of the first buffer obtained by an append to an empty container.
pub const MIN_NON_ZERO_CAPACITY: usize = 1;

/// Multiplier applied to the live size when an append finds no spare slot.
pub const GROWTH_FACTOR: usize = 2;

/// Capacity of the replacement buffer for a single-element append or insert
/// into a full container of `len` elements.
///
/// Returns [`ContigError::CapacityOverflow`] if the doubled size does not fit
/// in `usize`.
pub fn grown_capacity(len: usize) -> Result<usize, ContigError> {
    if len == 0 {
        return Ok(MIN_NON_ZERO_CAPACITY);
    }
    len.checked_mul(GROWTH_FACTOR)
        .ok_or(ContigError::CapacityOverflow {
            requested: len.saturating_add(1),
        })
}

/// Capacity of the replacement buffer for inserting `additional` elements
/// into a container of `len` elements that lacks the spare room.
pub fn bulk_capacity(len: usize, additional: usize) -> Result<usize, ContigError> {
    len.checked_add(len.max(additional))
        .ok_or(ContigError::CapacityOverflow {
            requested: len.saturating_add(additional),
        })
}

/// Theoretical ceiling on the element count for elements of `elem_size`
/// bytes: the largest byte distance a pointer difference can express,
/// divided by the element size.
///
/// Informational only. Allocation can fail long before this is reached.
pub fn max_size(elem_size: usize) -> usize {
    isize::MAX as usize / elem_size.max(1)
}

/// Reject element counts above [`max_size`] before any allocator call.
pub fn check_capacity(requested: usize, elem_size: usize) -> Result<usize, ContigError> {
    if requested > max_size(elem_size) {
        return Err(ContigError::CapacityOverflow { requested });
    }
    Ok(requested)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_append_allocates_one_slot() {
        assert_eq!(grown_capacity(0), Ok(1));
    }

    #[test]
    fn appends_double_from_empty() {
        let mut cap = 0;
        let mut seen = Vec::new();
        for len in 0..100usize {
            if len == cap {
                cap = grown_capacity(len).unwrap();
                seen.push(cap);
            }
        }
        assert_eq!(seen, vec![1, 2, 4, 8, 16, 32, 64, 128]);
    }

    #[test]
    fn doubling_overflow_is_reported() {
        let err = grown_capacity(usize::MAX / 2 + 1).unwrap_err();
        assert!(matches!(err, ContigError::CapacityOverflow { .. }));
    }

    #[test]
    fn bulk_takes_larger_of_len_and_count() {
        assert_eq!(bulk_capacity(10, 3), Ok(20));
        assert_eq!(bulk_capacity(3, 10), Ok(13));
        assert_eq!(bulk_capacity(0, 5), Ok(5));
    }

    #[test]
    fn bulk_overflow_is_reported() {
        assert!(bulk_capacity(usize::MAX, 1).is_err());
    }

    #[test]
    fn max_size_divides_address_space() {
        assert_eq!(max_size(1), isize::MAX as usize);
        assert_eq!(max_size(8), isize::MAX as usize / 8);
        assert_eq!(max_size(0), isize::MAX as usize);
    }

    #[test]
    fn check_capacity_rejects_above_ceiling() {
        assert_eq!(check_capacity(4, 8), Ok(4));
        assert_eq!(
            check_capacity(max_size(8) + 1, 8),
            Err(ContigError::CapacityOverflow {
                requested: max_size(8) + 1
            })
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn grown_capacity_always_fits_one_more(len in 0usize..1_000_000) {
                let cap = grown_capacity(len).unwrap();
                prop_assert!(cap > len);
                prop_assert!(cap >= MIN_NON_ZERO_CAPACITY);
            }

            #[test]
            fn bulk_capacity_fits_request(len in 0usize..1_000_000, n in 1usize..1_000_000) {
                let cap = bulk_capacity(len, n).unwrap();
                prop_assert!(cap >= len + n);
                prop_assert!(cap >= 2 * len);
            }

            #[test]
            fn append_copies_are_amortized(k in 1usize..5_000) {
                // Each growth copies every live element once.
                let mut cap = 0usize;
                let mut copies = 0usize;
                for len in 0..k {
                    if len == cap {
                        copies += len;
                        cap = grown_capacity(len).unwrap();
                    }
                }
                prop_assert!(copies < 2 * k);
            }
        }
    }
}
