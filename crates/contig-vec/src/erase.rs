//! Removal: by position, by range, and from the back.
//!
//! Erasure never reallocates. The elements after the removed range are
//! copy-assigned forward over it and the now-surplus trailing slots are
//! destroyed, so capacity is unchanged and the returned index names the
//! element that followed the removed ones.

use std::ops::{Bound, RangeBounds};

use contig_core::ContigError;

use crate::alloc::Allocator;
use crate::relocate;
use crate::vector::Vector;

impl<T, A: Allocator> Vector<T, A> {
    /// Destroy every element from `len` onwards. No-op if `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        self.buf.truncate(len);
    }

    /// Destroy every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.buf.truncate(0);
    }
}

impl<T: Clone, A: Allocator> Vector<T, A> {
    /// Remove the element at `index`.
    ///
    /// Returns the index of the element that followed it, which equals the
    /// new `len` when the last element was removed.
    pub fn erase(&mut self, index: usize) -> Result<usize, ContigError> {
        let len = self.len();
        if index >= len {
            return Err(ContigError::IndexOutOfRange { index, len });
        }
        relocate::assign_forward(self.as_mut_slice(), index + 1..len, 1);
        self.buf.truncate(len - 1);
        Ok(index)
    }

    /// Remove every element in `range`.
    ///
    /// An empty range removes nothing and returns its start. A range that
    /// is reversed or reaches past `len` is rejected.
    pub fn erase_range<R>(&mut self, range: R) -> Result<usize, ContigError>
    where
        R: RangeBounds<usize>,
    {
        let len = self.len();
        let first = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let last = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => len,
        };
        if last > len {
            return Err(ContigError::IndexOutOfRange { index: last, len });
        }
        if first > last {
            return Err(ContigError::IndexOutOfRange { index: first, len });
        }
        if first == last {
            return Ok(first);
        }
        let removed = last - first;
        relocate::assign_forward(self.as_mut_slice(), last..len, removed);
        self.buf.truncate(len - removed);
        Ok(first)
    }

    /// Make the length exactly `len`, appending copies of `value` or
    /// destroying trailing elements as needed.
    pub fn resize(&mut self, len: usize, value: &T) -> Result<(), ContigError> {
        let current = self.len();
        if len <= current {
            self.buf.truncate(len);
            return Ok(());
        }
        self.insert_fill(current, len - current, value)?;
        Ok(())
    }

    /// [`resize`](Vector::resize) with `T::default()` as the fill value.
    pub fn resize_default(&mut self, len: usize) -> Result<(), ContigError>
    where
        T: Default,
    {
        self.resize(len, &T::default())
    }
}
